//! Botform - headless submission of a bot form
//!
//! Loads a form description, runs one submission through the same flow the
//! page uses and prints the resulting panel.

use anyhow::{Context, Result};
use botform::config::AppConfig;
use botform::forms::FormSnapshot;
use botform::submit::{
    FormVariant, HttpFormTransport, SubmissionOrchestrator, SubmitOptions, SubmitOutcome,
};
use botform::surface::{Element, MemorySurface, UiSurface};
use botform::telegram::HttpTelegramApi;
use botform::{EventOutcome, FormKit, UiEvent};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A bot form as the page would hold it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormFile {
    #[serde(default)]
    variant: FormVariant,
    /// Address of the page; relative actions resolve against it
    location: String,
    form: FormSnapshot,
    /// Values of inputs read by id (token and group ids)
    #[serde(default)]
    inputs: BTreeMap<String, String>,
    redirect_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "botform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: botform <form.json>")?;
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;
    let input: FormFile =
        serde_json::from_str(&raw).with_context(|| format!("invalid form description in {path}"))?;

    let app_config = AppConfig::load()?;
    let (surface, kit) = build_kit(input, &app_config)?;

    for locator in kit.group_id_inputs() {
        kit.handle_event(UiEvent::GroupIdInput(locator.to_string()))
            .await;
    }
    let outcome = kit.handle_event(UiEvent::Submit).await;

    report(&surface, &app_config);
    match outcome {
        EventOutcome::Submitted(SubmitOutcome::Succeeded { .. }) => Ok(()),
        EventOutcome::Submitted(SubmitOutcome::NoForm) => {
            anyhow::bail!("no form to submit")
        }
        _ => std::process::exit(1),
    }
}

fn build_kit(input: FormFile, app_config: &AppConfig) -> Result<(Arc<MemorySurface>, FormKit)> {
    let surface = Arc::new(MemorySurface::bot_form_page(&input.location));
    for (id, value) in &input.inputs {
        surface.insert(id, Element::with_value(value));
    }

    let defaults = SubmitOptions::default();
    let options = SubmitOptions {
        form_selector: app_config
            .form_selector
            .clone()
            .unwrap_or(defaults.form_selector),
        redirect_url: input.redirect_url,
        ..SubmitOptions::default()
    };
    surface.insert_form(&options.form_selector, input.form);

    let transport = Arc::new(HttpFormTransport::new()?);
    let orchestrator = match input.variant {
        FormVariant::Simple => SubmissionOrchestrator::simple(surface.clone(), transport, options),
        FormVariant::Verified => {
            let telegram = HttpTelegramApi::with_base_url(app_config.telegram_api_base())?;
            SubmissionOrchestrator::verified(surface.clone(), Arc::new(telegram), transport, options)
        }
    };
    orchestrator.set_config(&app_config.ui);
    Ok((surface, FormKit::new(orchestrator)))
}

/// Print whichever panel the submission left visible, and the redirect
fn report(surface: &MemorySurface, app_config: &AppConfig) {
    let slots = app_config.form_utils();
    let text = |id: &str| surface.text(id).unwrap_or_default();

    if surface.is_visible(&slots.success_display_id) {
        println!(
            "✓ {}: {}",
            text(&slots.success_title_id),
            text(&slots.success_message_id)
        );
    }
    if surface.is_visible(&slots.error_display_id) {
        println!(
            "✗ {}: {}",
            text(&slots.error_title_id),
            text(&slots.error_message_id)
        );
    }
    for redirect in surface.redirects() {
        println!("→ {} (in {} ms)", redirect.url, redirect.delay.as_millis());
    }
}
