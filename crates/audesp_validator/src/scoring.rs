//! Completion scoring and summary advice.

/// More missing required fields than this earns a prioritisation hint.
pub const MISSING_FIELDS_HINT_THRESHOLD: usize = 3;

/// More errors than this earns a hint to import data instead of typing it.
pub const ERROR_COUNT_HINT_THRESHOLD: usize = 5;

/// Tally of required slots seen during a validation pass.
///
/// A slot is one required field at one concrete path; fields inside
/// sequence items count once per item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Required slots reached
    pub required: usize,
    /// Slots present, well-typed and within constraints
    pub satisfied: usize,
    /// Slots absent, null or empty
    pub missing: usize,
}

impl Completion {
    /// Satisfied over required slots as a percentage rounded to one decimal.
    ///
    /// With no required slots the filing is complete.
    pub fn percentage(&self) -> f64 {
        if self.required == 0 {
            return 100.0;
        }
        let ratio = self.satisfied as f64 / self.required as f64;
        (ratio * 1000.0).round() / 10.0
    }

    /// Free-text advice derived from the counts, in a stable order.
    pub fn summary_suggestions(&self, error_count: usize) -> Vec<String> {
        let mut suggestions = Vec::new();

        if self.missing > MISSING_FIELDS_HINT_THRESHOLD {
            suggestions.push(format!(
                "Existem {} campos obrigatórios vazios. Priorize o preenchimento deles.",
                self.missing
            ));
        }

        if error_count > ERROR_COUNT_HINT_THRESHOLD {
            suggestions.push(
                "Considere importar dados de um PDF ou arquivo estruturado para acelerar o preenchimento."
                    .to_string(),
            );
        }

        let percentage = self.percentage();
        if percentage > 0.0 && percentage < 50.0 {
            suggestions.push(format!(
                "Continue preenchendo! Você já completou {}% do formulário.",
                percentage.round()
            ));
        } else if (50.0..100.0).contains(&percentage) {
            let remaining = self.required - self.satisfied;
            suggestions.push(if remaining == 1 {
                "Quase lá! Apenas 1 campo falta.".to_string()
            } else {
                format!("Quase lá! Apenas {} campos faltam.", remaining)
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percentage() {
        let empty = Completion::default();
        assert_eq!(empty.percentage(), 100.0);

        let third = Completion {
            required: 3,
            satisfied: 1,
            missing: 2,
        };
        assert_eq!(third.percentage(), 33.3);

        let none = Completion {
            required: 4,
            satisfied: 0,
            missing: 4,
        };
        assert_eq!(none.percentage(), 0.0);
    }

    #[test]
    fn test_no_advice_when_complete() {
        let complete = Completion {
            required: 5,
            satisfied: 5,
            missing: 0,
        };
        assert!(complete.summary_suggestions(0).is_empty());
    }

    #[test]
    fn test_advice_when_empty() {
        let empty = Completion {
            required: 6,
            satisfied: 0,
            missing: 6,
        };
        assert_eq!(
            empty.summary_suggestions(6),
            vec![
                "Existem 6 campos obrigatórios vazios. Priorize o preenchimento deles.".to_string(),
                "Considere importar dados de um PDF ou arquivo estruturado para acelerar o preenchimento."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_progress_advice() {
        let started = Completion {
            required: 10,
            satisfied: 2,
            missing: 8,
        };
        assert_eq!(
            started.summary_suggestions(0).last().map(String::as_str),
            Some("Continue preenchendo! Você já completou 20% do formulário.")
        );

        let almost = Completion {
            required: 10,
            satisfied: 9,
            missing: 1,
        };
        assert_eq!(
            almost.summary_suggestions(1),
            vec!["Quase lá! Apenas 1 campo falta.".to_string()]
        );
    }
}
