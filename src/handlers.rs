use crate::classify::{classify, format_tons, tier_table, TierRow};
use crate::errors::AppError;
use crate::input::{usage_from_form, usage_from_request};
use crate::models::{CalculationResponse, StateResponse, UsageForm, UsageRequest};
use crate::state::{AppState, Outcome, FAILURE_MESSAGE};
use crate::ui::{render_calculator, render_home};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Local;
use tracing::{error, info};

pub async fn home() -> Html<String> {
    Html(render_home())
}

pub async fn calculator(State(state): State<AppState>) -> Html<String> {
    let page = state.page.lock().await;
    Html(render_calculator(&page))
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<UsageForm>) -> Redirect {
    let ticket = state.next_ticket();
    let outcome = run_submission(&state, form).await;
    let calculated = matches!(outcome, Outcome::Calculated { .. });

    if !state.apply(ticket, outcome).await {
        info!(ticket, "dropped stale submission");
    }

    if calculated {
        Redirect::to("/calculate#results")
    } else {
        Redirect::to("/calculate")
    }
}

pub async fn calculate_api(
    State(state): State<AppState>,
    Json(payload): Json<UsageRequest>,
) -> Result<Json<CalculationResponse>, AppError> {
    let input = usage_from_request(&payload, &state.region)?;

    let result = state
        .client
        .calculate(&input)
        .await
        .map_err(|err| {
            error!("error calculating emissions: {err}");
            AppError::bad_gateway(FAILURE_MESSAGE)
        })?
        .rounded();

    Ok(Json(CalculationResponse {
        scope1: result.scope1,
        scope2: result.scope2,
        scope1_tons: format_tons(result.scope1),
        scope2_tons: format_tons(result.scope2),
        classification: classify(result.scope1, result.scope2),
    }))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let page = state.page.lock().await;
    Json(page.to_response())
}

pub async fn get_tiers() -> Json<Vec<TierRow>> {
    Json(tier_table())
}

async fn run_submission(state: &AppState, form: UsageForm) -> Outcome {
    let input = match usage_from_form(&form, &state.region) {
        Ok(input) => input,
        Err(error) => {
            info!("rejected submission: {error}");
            return Outcome::Rejected {
                inputs: form,
                error,
            };
        }
    };

    match state.client.calculate(&input).await {
        Ok(result) => {
            info!(
                scope1 = result.scope1,
                scope2 = result.scope2,
                "emissions calculated"
            );
            Outcome::Calculated {
                inputs: form,
                result,
                calculated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            }
        }
        Err(err) => {
            error!(url = state.client.url(), "error calculating emissions: {err}");
            Outcome::Failed { inputs: form }
        }
    }
}
