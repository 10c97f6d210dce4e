//! Section validators for the plan list and the single-offer section
//!
//! Validators are pure functions over a [`FormSnapshot`]. The first failing
//! rule decides the returned title and message.

use super::snapshot::FormSnapshot;
use thiserror::Error;

const VALIDATION_TITLE: &str = "Erro de Validação";

/// Smallest accepted price, in reais
pub const MIN_PRICE: f64 = 0.01;

/// A titled, user-facing validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct ValidationFailure {
    pub title: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one section
pub type SectionValidationResult = Result<(), ValidationFailure>;

/// Field names of the repeatable plan rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSelectors {
    pub pix: String,
    pub name: String,
    pub duration: String,
}

impl Default for PlanSelectors {
    fn default() -> Self {
        Self {
            pix: "pix_values[]".to_string(),
            name: "plan_names[]".to_string(),
            duration: "plan_duration[]".to_string(),
        }
    }
}

/// Field names of the single-offer section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferFieldNames {
    pub name: String,
    pub price: String,
    pub message: String,
    pub deliverable: String,
    pub accept_text: String,
    pub decline_text: String,
}

impl Default for OfferFieldNames {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            price: "price".to_string(),
            message: "message".to_string(),
            deliverable: "deliverable_message".to_string(),
            accept_text: "accept_button_text".to_string(),
            decline_text: "decline_button_text".to_string(),
        }
    }
}

/// Check that the plan list has at least one price, one name and one duration.
///
/// Each criterion is satisfied independently: one row may carry the price
/// while another carries the name.
pub fn validate_plan_section(form: &FormSnapshot, selectors: &PlanSelectors) -> SectionValidationResult {
    let has_value = form
        .values(&selectors.pix)
        .any(|v| parse_float(v).is_some_and(|p| p >= MIN_PRICE));
    let has_name = form.values(&selectors.name).any(|v| !v.trim().is_empty());
    let has_duration = form
        .values(&selectors.duration)
        .any(|v| !v.trim().is_empty());

    if !has_value {
        return Err(ValidationFailure::new(
            VALIDATION_TITLE,
            "Configure pelo menos um valor PIX para o seu bot!",
        ));
    }
    if !has_name {
        return Err(ValidationFailure::new(
            VALIDATION_TITLE,
            "Configure pelo menos um nome de plano para o seu bot!",
        ));
    }
    if !has_duration {
        return Err(ValidationFailure::new(
            VALIDATION_TITLE,
            "Configure pelo menos uma duração de plano para o seu bot!",
        ));
    }
    Ok(())
}

/// Check every field of the single-offer section, stopping at the first failure
pub fn validate_offer_section(form: &FormSnapshot, names: &OfferFieldNames) -> SectionValidationResult {
    let filled = |name: &str| form.field(name).is_some_and(|f| !f.is_blank());

    if !filled(&names.name) {
        return Err(ValidationFailure::new(
            "Nome obrigatório",
            "Informe o nome da oferta.",
        ));
    }
    let price = form
        .field(&names.price)
        .and_then(|f| parse_float(f.as_text()));
    if !price.is_some_and(|p| p >= MIN_PRICE) {
        return Err(ValidationFailure::new(
            "Preço inválido",
            "Informe um preço válido (mínimo R$ 0,01).",
        ));
    }
    if !filled(&names.message) {
        return Err(ValidationFailure::new(
            "Mensagem obrigatória",
            "Informe a mensagem da oferta.",
        ));
    }
    if !filled(&names.deliverable) {
        return Err(ValidationFailure::new(
            "Entregável obrigatório",
            "Informe a mensagem do entregável que será enviada após o pagamento.",
        ));
    }
    if !filled(&names.accept_text) {
        return Err(ValidationFailure::new(
            "Texto do botão",
            "Informe o texto do botão de aceitar.",
        ));
    }
    if !filled(&names.decline_text) {
        return Err(ValidationFailure::new(
            "Texto do botão",
            "Informe o texto do botão de recusar.",
        ));
    }
    Ok(())
}

/// Parse the longest numeric prefix of `input`, ignoring leading whitespace.
///
/// `"19.90"` and `"19.90 reais"` both give `19.9`; `"abc"` and `""` give `None`.
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
