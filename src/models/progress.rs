use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Difficulty, Question};

/// Answers given so far in a session, in presentation order.
///
/// `fingerprint` and `order` tie the answers to the question sequence they
/// were given against. Both are optional so older progress files that only
/// carry `user_answers` still parse; such files never match a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub user_answers: Vec<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<usize>,
}

impl Progress {
    /// Fresh progress bound to a question sequence.
    pub fn new(fingerprint: String, order: Vec<usize>) -> Self {
        Self {
            user_answers: Vec::new(),
            fingerprint: Some(fingerprint),
            order,
        }
    }

    pub fn answered(&self) -> usize {
        self.user_answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_answers.is_empty()
    }

    pub fn record(&mut self, answer: String) {
        self.user_answers.push(Some(answer));
    }

    pub fn reset(&mut self) {
        self.user_answers.clear();
        self.fingerprint = None;
        self.order.clear();
    }

    /// Whether this progress can be resumed against `question_count`
    /// questions identified by `fingerprint`.
    pub fn matches(&self, fingerprint: &str, question_count: usize) -> bool {
        self.fingerprint.as_deref() == Some(fingerprint)
            && is_permutation(&self.order, question_count)
            && self.user_answers.len() <= question_count
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        if index >= len || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

/// Content hash of a filtered question set, taken before shuffling.
pub fn fingerprint(difficulty: Difficulty, questions: &[Question]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(difficulty.as_str().as_bytes());
    for question in questions {
        hasher.update([0u8]);
        // Question only holds strings and enums; encoding cannot fail.
        if let Ok(encoded) = serde_json::to_vec(question) {
            hasher.update(&encoded);
        }
    }
    format!("sha256:{:x}", hasher.finalize())
}
