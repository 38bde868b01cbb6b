use crate::document::{Display, FormEcho, ResultPanel, Slot};
use crate::errors::{ClientError, ValidationError};
use crate::models::{BacForm, CalculationRequest, CalculationResponse, WeightUnit};
use reqwest::Client;
use tracing::{error, info};

pub const CALCULATE_PATH: &str = "/api/calculate";
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Outbound side of the BAC form. One POST per submission; no retry and no
/// timeout.
#[derive(Debug, Clone)]
pub struct CalcClient {
    http: Client,
    endpoint: String,
}

impl CalcClient {
    pub fn new(backend_url: &str) -> Self {
        Self::with_client(Client::new(), backend_url)
    }

    pub fn with_client(http: Client, backend_url: &str) -> Self {
        let endpoint = format!("{}{CALCULATE_PATH}", backend_url.trim_end_matches('/'));
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Any JSON body of the right shape is accepted regardless of status,
    /// so a 400 carrying `{"error": ...}` comes back as `Ok(Failure)`.
    pub async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, ClientError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Validates the form, sends it, and renders whatever comes back into a
    /// result panel. Validation failures never reach the network.
    pub async fn submit(&self, form: &BacForm) -> ResultPanel {
        let request = match build_request(form) {
            Ok(request) => request,
            Err(err) => return render_validation_error(&err),
        };

        info!(
            weight = request.weight,
            gender = %request.gender,
            current_drinks = request.current_drinks,
            endpoint = %self.endpoint,
            "sending calculation request"
        );

        match self.calculate(&request).await {
            Ok(response) => render_response(&response),
            Err(err) => {
                error!("calculation request failed: {err}");
                render_failure()
            }
        }
    }
}

/// Parses and normalizes the raw form. Weight leaves here in kilograms.
pub fn build_request(form: &BacForm) -> Result<CalculationRequest, ValidationError> {
    let weight: f64 = form
        .weight
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidWeight)?;
    if !weight.is_finite() {
        return Err(ValidationError::InvalidWeight);
    }

    let gender = form
        .gender
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingGender)?;

    let current_drinks: i64 = form
        .current_drinks
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidDrinks)?;

    let unit = WeightUnit::parse(form.weight_unit.trim());

    Ok(CalculationRequest {
        weight: unit.to_kg(weight),
        gender: gender.to_string(),
        current_drinks,
    })
}

pub fn render_response(response: &CalculationResponse) -> ResultPanel {
    let (drinks_to_target, time_to_sober) = match response {
        CalculationResponse::Failure { error } => {
            (Slot::Text(format!("Error: {error}")), Slot::Empty)
        }
        CalculationResponse::Success {
            drinks_to_reach_target,
            time_to_sober,
        } => (drinks_message(*drinks_to_reach_target), sober_message(*time_to_sober)),
    };

    ResultPanel {
        display: Display::Flex,
        drinks_to_target,
        time_to_sober,
    }
}

/// Transport and decode failures. The container is shown with
/// `display: block` here but `display: flex` on every other path; the two
/// have never agreed and are kept apart until someone decides which is
/// intended.
pub fn render_failure() -> ResultPanel {
    ResultPanel {
        display: Display::Block,
        drinks_to_target: Slot::Text(GENERIC_FAILURE.to_string()),
        time_to_sober: Slot::Empty,
    }
}

pub fn render_validation_error(err: &ValidationError) -> ResultPanel {
    ResultPanel {
        display: Display::Flex,
        drinks_to_target: Slot::Text(err.to_string()),
        time_to_sober: Slot::Empty,
    }
}

pub fn echo_form(form: &BacForm) -> FormEcho {
    let weight_unit = match WeightUnit::parse(form.weight_unit.trim()) {
        WeightUnit::Kg => "kg",
        WeightUnit::Lbs => "lbs",
    };
    FormEcho {
        weight: form.weight.clone(),
        weight_unit: weight_unit.to_string(),
        gender: form.gender.clone(),
        current_drinks: form.current_drinks.clone(),
    }
}

fn drinks_message(drinks: f64) -> Slot {
    if drinks > 0.0 {
        Slot::Markup(format!(
            "<i class=\"bi bi-cup-straw\"></i> You need to slam about <strong>{drinks}</strong> more drinks to get legendary."
        ))
    } else {
        Slot::Markup(
            "<i class=\"bi bi-check-circle-fill\"></i> Bro, you're already there. Send it!"
                .to_string(),
        )
    }
}

fn sober_message(hours: f64) -> Slot {
    if hours > 0.0 {
        Slot::Markup(format!(
            "<i class=\"bi bi-clock-history\"></i> It'll take like <strong>{hours}</strong> hours 'til you're not seeing double."
        ))
    } else {
        Slot::Markup(
            "<i class=\"bi bi-emoji-sunglasses-fill\"></i> You're sober, my dude. Time to change that."
                .to_string(),
        )
    }
}
