use anyhow::{Context, Result};
use api::{Question, QuestionBank, Unit};
use log::info;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBankData {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Question bank kept as a single pretty-printed JSON file.
pub struct JsonQuestionBank {
    pub data: QuestionBankData,
    storage_path: PathBuf,
}

impl JsonQuestionBank {
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            data: QuestionBankData::default(),
            storage_path,
        }
    }

    /// Loads `path`, or starts empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let mut bank = Self::new(path.to_path_buf());
        bank.load()?;
        Ok(bank)
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn load(&mut self) -> Result<()> {
        if !self.storage_path.exists() {
            info!(
                "No question bank found at {:?}, starting empty",
                self.storage_path
            );
            return Ok(());
        }

        let file = File::open(&self.storage_path).context("Failed to open question bank")?;
        let reader = BufReader::new(file);
        self.data =
            serde_json::from_reader(reader).context("Failed to deserialize question bank")?;
        info!(
            "Loaded {} question(s) in {} unit(s) from {:?}",
            self.data.questions.len(),
            self.data.units.len(),
            self.storage_path
        );
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create question bank dir: {:?}", parent))?;
            }
        }
        let file = File::create(&self.storage_path).context("Failed to create question bank file")?;
        serde_json::to_writer_pretty(file, &self.data)
            .context("Failed to serialize question bank")?;
        info!("Saved question bank to {:?}", self.storage_path);
        Ok(())
    }

    pub fn units(&self) -> &[Unit] {
        &self.data.units
    }

    pub fn questions(&self) -> &[Question] {
        &self.data.questions
    }

    pub fn add_unit(&mut self, name: &str) -> u64 {
        let id = self.data.units.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        self.data.units.push(Unit {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn add_question(
        &mut self,
        unit_id: u64,
        text: &str,
        correct_answer: &str,
        wrong_answer: &str,
    ) -> Result<u64> {
        if !self.data.units.iter().any(|u| u.id == unit_id) {
            anyhow::bail!("Unknown unit {}", unit_id);
        }
        let id = self.data.questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        self.data.questions.push(Question {
            id,
            unit_id,
            text: text.to_string(),
            correct_answer: correct_answer.to_string(),
            wrong_answer: wrong_answer.to_string(),
            disabled: false,
        });
        Ok(id)
    }

    pub fn set_disabled(&mut self, question_id: u64, disabled: bool) -> Result<()> {
        let question = self
            .data
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .with_context(|| format!("Unknown question {}", question_id))?;
        question.disabled = disabled;
        Ok(())
    }
}

impl QuestionBank for JsonQuestionBank {
    fn game_questions(
        &self,
        shuffle: bool,
        limit: Option<usize>,
        unit_ids: Option<&[u64]>,
    ) -> Result<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .data
            .questions
            .iter()
            .filter(|q| !q.disabled)
            .filter(|q| unit_ids.is_none_or(|ids| ids.contains(&q.unit_id)))
            .cloned()
            .collect();

        if shuffle {
            questions.shuffle(&mut rand::rng());
        }
        if let Some(limit) = limit {
            questions.truncate(limit);
        }
        Ok(questions)
    }
}
