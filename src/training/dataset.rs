//! Labelled dataset loading.
//!
//! Three optional sources are recognised inside the data directory:
//!
//! | File | Encoding | Columns |
//! |---|---|---|
//! | `spam.csv` | latin-1 | `v1` (`ham`/`spam`), `v2` text |
//! | `phishing_email_dataset.csv` | utf-8 | `Email Text`, `Email Type` |
//! | `SMSSpamCollection` | latin-1 | tab separated `label\ttext`, no header |

use crate::{error::ModelError, models::label::Label};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One labelled message.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub text: String,
    pub label: Label,
}

impl Sample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Known dataset layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    EmailSpam,
    Phishing,
    SmsSpam,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [Self::EmailSpam, Self::Phishing, Self::SmsSpam];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::EmailSpam => "spam.csv",
            Self::Phishing => "phishing_email_dataset.csv",
            Self::SmsSpam => "SMSSpamCollection",
        }
    }

    fn map_label(&self, raw: &str) -> Option<Label> {
        match (self, raw.trim()) {
            (Self::EmailSpam | Self::SmsSpam, "ham") => Some(Label::Legit),
            (Self::EmailSpam | Self::SmsSpam, "spam") => Some(Label::Spam),
            (Self::Phishing, "Phishing Email") => Some(Label::Phishing),
            (Self::Phishing, "Safe Email") => Some(Label::Legit),
            _ => None,
        }
    }

    /// Parse one dataset file. Rows with unknown labels or blank text are dropped.
    pub fn load(&self, path: &Path) -> Result<Vec<Sample>, ModelError> {
        let bytes = fs::read(path)?;
        let content = match self {
            Self::Phishing => String::from_utf8_lossy(&bytes).into_owned(),
            Self::EmailSpam | Self::SmsSpam => decode_latin1(&bytes),
        };

        let (mut reader, label_col, text_col) = match self {
            Self::SmsSpam => {
                let reader = csv::ReaderBuilder::new()
                    .delimiter(b'\t')
                    .has_headers(false)
                    .quoting(false)
                    .flexible(true)
                    .from_reader(content.as_bytes());
                (reader, 0, 1)
            }
            Self::EmailSpam | Self::Phishing => {
                let mut reader = csv::ReaderBuilder::new()
                    .flexible(true)
                    .from_reader(content.as_bytes());
                let (label_name, text_name) = match self {
                    Self::EmailSpam => ("v1", "v2"),
                    _ => ("Email Type", "Email Text"),
                };
                let headers = reader.headers()?.clone();
                let label_col = column(&headers, label_name, path)?;
                let text_col = column(&headers, text_name, path)?;
                (reader, label_col, text_col)
            }
        };

        let mut samples = Vec::new();
        for record in reader.records() {
            let record = record?;
            let (Some(raw_label), Some(text)) = (record.get(label_col), record.get(text_col))
            else {
                continue;
            };
            let Some(label) = self.map_label(raw_label) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            samples.push(Sample::new(text, label));
        }

        Ok(samples)
    }
}

fn column(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize, ModelError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| ModelError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

/// Every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Load every dataset present in `dir`.
///
/// Missing files are skipped; files that fail to parse are skipped with a warning.
pub fn load_dir(dir: &Path) -> Vec<Sample> {
    let mut all = Vec::new();

    for kind in DatasetKind::ALL {
        let path: PathBuf = dir.join(kind.file_name());
        if !path.exists() {
            tracing::info!(path = %path.display(), "Dataset not found, skipping");
            continue;
        }

        match kind.load(&path) {
            Ok(samples) => {
                tracing::info!(path = %path.display(), examples = samples.len(), "Dataset loaded");
                all.extend(samples);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to load dataset, skipping");
            }
        }
    }

    all
}

/// Drop repeated texts (first occurrence wins), then shuffle deterministically.
///
/// Returns the combined samples and how many duplicates were removed.
pub fn dedup_and_shuffle(samples: Vec<Sample>, seed: u64) -> (Vec<Sample>, usize) {
    let before = samples.len();
    let mut seen = HashSet::new();
    let mut unique: Vec<Sample> = samples
        .into_iter()
        .filter(|s| seen.insert(s.text.clone()))
        .collect();
    let removed = before - unique.len();

    let mut rng = StdRng::seed_from_u64(seed);
    unique.shuffle(&mut rng);

    (unique, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("email-guard-data-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_email_spam_csv_latin1() {
        let dir = temp_dir();
        let path = dir.join("spam.csv");
        let mut content = b"v1,v2,,,\nham,Caf\xe9 at noon?,,,\nspam,\"WIN cash, now\",,,\nother,ignored,,,\nham,   ,,,\n".to_vec();
        content.extend_from_slice(b"spam,Free entry,,,\n");
        fs::write(&path, content).unwrap();

        let samples = DatasetKind::EmailSpam.load(&path).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::new("Café at noon?", Label::Legit),
                Sample::new("WIN cash, now", Label::Spam),
                Sample::new("Free entry", Label::Spam),
            ]
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_phishing_csv() {
        let dir = temp_dir();
        let path = dir.join("phishing_email_dataset.csv");
        fs::write(
            &path,
            ",Email Text,Email Type\n0,Reset your password now,Phishing Email\n1,Lunch on Friday?,Safe Email\n2,odd,Unknown\n",
        )
        .unwrap();

        let samples = DatasetKind::Phishing.load(&path).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::new("Reset your password now", Label::Phishing),
                Sample::new("Lunch on Friday?", Label::Legit),
            ]
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let dir = temp_dir();
        let path = dir.join("phishing_email_dataset.csv");
        fs::write(&path, "text,label\nhi,Safe Email\n").unwrap();

        let err = DatasetKind::Phishing.load(&path).unwrap_err();
        assert!(matches!(err, ModelError::MissingColumn { ref column, .. } if column == "Email Type"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_sms_collection_keeps_quotes() {
        let dir = temp_dir();
        let path = dir.join("SMSSpamCollection");
        fs::write(&path, "ham\tOk \"see\" you\nspam\tCall 0800 now!\n").unwrap();

        let samples = DatasetKind::SmsSpam.load(&path).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::new("Ok \"see\" you", Label::Legit),
                Sample::new("Call 0800 now!", Label::Spam),
            ]
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_dir_skips_missing_and_broken() {
        let dir = temp_dir();
        fs::write(dir.join("SMSSpamCollection"), "ham\thello there\n").unwrap();
        fs::write(dir.join("phishing_email_dataset.csv"), "no,useful,columns\n").unwrap();

        let samples = load_dir(&dir);
        assert_eq!(samples, vec![Sample::new("hello there", Label::Legit)]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_dedup_first_wins_and_shuffle_is_deterministic() {
        let samples = vec![
            Sample::new("a", Label::Legit),
            Sample::new("b", Label::Spam),
            Sample::new("a", Label::Spam),
            Sample::new("c", Label::Phishing),
        ];

        let (first, removed) = dedup_and_shuffle(samples.clone(), 42);
        let (second, _) = dedup_and_shuffle(samples, 42);

        assert_eq!(removed, 1);
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert!(first.contains(&Sample::new("a", Label::Legit)));
        assert!(!first.contains(&Sample::new("a", Label::Spam)));
    }
}
