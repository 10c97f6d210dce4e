//! Progress step status and messages

use std::collections::BTreeMap;

/// Status of one progress step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Error,
}

impl StepStatus {
    /// Class name used next to `step`
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Glyph shown in front of the step label
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Pending | Self::Active => "⏳",
            Self::Completed => "✓",
            Self::Error => "✗",
        }
    }
}

/// Progress message per 1-based step number
pub type StepMessages = BTreeMap<usize, String>;

fn messages(entries: [(usize, &str); 4]) -> StepMessages {
    entries
        .into_iter()
        .map(|(step, text)| (step, text.to_string()))
        .collect()
}

/// Messages used when the caller supplies none
pub fn default_step_messages() -> StepMessages {
    messages([
        (1, "Verificando se o token é válido..."),
        (2, "Testando acesso ao grupo VIP como admin..."),
        (3, "Testando acesso ao grupo de notificações como admin..."),
        (4, "Criando e ativando seu bot..."),
    ])
}

/// Messages of the verified edit flow
pub fn verified_save_messages() -> StepMessages {
    messages([
        (1, "Verificando se o token é válido..."),
        (2, "Testando acesso ao grupo VIP como admin..."),
        (3, "Testando acesso ao grupo de notificações como admin..."),
        (4, "Salvando alterações..."),
    ])
}

/// Messages of the plain save flow
pub fn simple_save_messages() -> StepMessages {
    [(1, "Validando dados..."), (4, "Salvando alterações...")]
        .into_iter()
        .map(|(step, text)| (step, text.to_string()))
        .collect()
}
