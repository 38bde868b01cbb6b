use crate::calc_client::echo_form;
use crate::calculator::{drinks_to_target, time_to_sober};
use crate::document::Page;
use crate::errors::AppError;
use crate::metrics::{Metrics, RESULT_SUCCESS, RESULT_VALIDATION_ERROR};
use crate::models::{
    BacForm, CalculationRequest, CalculationResponse, Gender, HealthResponse, ModeForm, ThemeForm,
};
use crate::preferences::{init, on_mode_toggle, on_theme_change};
use crate::state::AppState;
use crate::ui::render_page;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use std::time::Instant;
use tracing::{error, info, info_span};

pub const SERVICE_NAME: &str = "are-you-drunk-yet";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&current_page(&state).await))
}

pub async fn set_mode(
    State(state): State<AppState>,
    Form(form): Form<ModeForm>,
) -> Result<Redirect, AppError> {
    let mut store = state.prefs.lock().await;
    let mut page = Page::new();
    init(&*store, &mut page);
    on_mode_toggle(&mut *store, &mut page, form.mode_switch.is_some()).await?;
    Ok(Redirect::to("/"))
}

pub async fn set_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> Result<Redirect, AppError> {
    let mut store = state.prefs.lock().await;
    let mut page = Page::new();
    init(&*store, &mut page);
    on_theme_change(&mut *store, &mut page, &form.theme).await?;
    Ok(Redirect::to("/"))
}

/// The BAC form. Renders the page in place with the result panel filled
/// instead of navigating anywhere.
pub async fn calculate_form(
    State(state): State<AppState>,
    Form(form): Form<BacForm>,
) -> Html<String> {
    let mut page = current_page(&state).await;
    page.form = echo_form(&form);
    page.result = state.client.submit(&form).await;
    Html(render_page(&page))
}

pub async fn calculate_api(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>, AppError> {
    let started = Instant::now();
    let result = info_span!("calculate_request")
        .in_scope(|| run_calculation(&state.metrics, payload));
    state
        .metrics
        .observe_duration("total_request", started.elapsed());
    result.map(Json)
}

fn run_calculation(
    metrics: &Metrics,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<CalculationResponse, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        let message = format!("Invalid input data: {}", rejection.body_text());
        error!("{message}");
        metrics.record_outcome("unknown", RESULT_VALIDATION_ERROR);
        AppError::bad_request(message)
    })?;

    let parsed_gender = Gender::parse(&request.gender);
    let gender = parsed_gender.map_or("invalid", Gender::as_str);
    let rejected = if request.weight <= 0.0 {
        Some("Weight must be greater than 0")
    } else if parsed_gender.is_none() {
        Some("Invalid gender")
    } else if request.current_drinks < 0 {
        Some("Current drinks cannot be negative")
    } else {
        None
    };
    if let Some(message) = rejected {
        metrics.record_outcome(gender, RESULT_VALIDATION_ERROR);
        return Err(AppError::bad_request(message));
    }

    info!(
        weight = request.weight,
        gender = %request.gender,
        current_drinks = request.current_drinks,
        "received calculation request"
    );

    let drinks = info_span!("calculate_drinks_to_target").in_scope(|| {
        let started = Instant::now();
        let drinks = drinks_to_target(request.weight, &request.gender, request.current_drinks);
        metrics.observe_duration("drinks_to_target", started.elapsed());
        drinks
    });
    let hours = info_span!("calculate_time_to_sober").in_scope(|| {
        let started = Instant::now();
        let hours = time_to_sober(request.current_drinks, request.weight, &request.gender);
        metrics.observe_duration("time_to_sober", started.elapsed());
        hours
    });

    metrics.record_outcome(gender, RESULT_SUCCESS);
    metrics.record_success(request.weight, drinks);

    info!(
        drinks_to_reach_target = drinks,
        time_to_sober = hours,
        "calculation successful"
    );

    Ok(CalculationResponse::Success {
        drinks_to_reach_target: drinks,
        time_to_sober: hours,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn current_page(state: &AppState) -> Page {
    let store = state.prefs.lock().await;
    let mut page = Page::new();
    init(&*store, &mut page);
    page
}
