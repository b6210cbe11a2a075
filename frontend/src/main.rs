//! Offline demo: runs the client against seeded in-memory data.
//!
//! Usage: `budget-frontend [config.yaml]`

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use uuid::Uuid;

use budget_frontend::components::dashboard::DashboardSummary;
use budget_frontend::components::envelope_card::EnvelopeCardProps;
use budget_frontend::components::sidebar::budget_sidebar;
use budget_frontend::services::api::paths;
use budget_frontend::services::auth::{CurrentUser, SessionStore};
use budget_frontend::services::logging::{init_logging, Logger};
use budget_frontend::services::mock::{Method, MockGateway};
use budget_frontend::{AppContext, FrontendConfig};

fn seed(gateway: &MockGateway, user: &CurrentUser) -> String {
    let budget_id = Uuid::new_v4().to_string();
    let budget = json!({ "id": budget_id, "name": "Household", "type": "shared", "participantCount": 2 });

    gateway.respond(Method::Get, paths::BUDGETS, json!({ "data": [budget.clone()], "meta": { "count": 1 } }));
    gateway.respond(
        Method::Get,
        &paths::budget_overview(&budget_id),
        json!({
            "data": {
                "budget": budget,
                "participants": [
                    { "id": user.id, "name": user.name, "email": user.email },
                    { "id": "demo-partner", "name": "Sam Rivera", "email": "sam@example.com" }
                ],
                "totals": { "balance": 154320, "income": 420000, "expense": 265680 },
                "period": { "start": "2026-10-01", "end": "2026-10-31" },
                "creatorId": user.id
            }
        }),
    );
    gateway.respond(
        Method::Get,
        &paths::budget_envelopes(&budget_id),
        json!({
            "data": [
                { "id": Uuid::new_v4().to_string(), "budgetId": budget_id, "category": "Groceries", "limit": 80000, "used": 61250 },
                { "id": Uuid::new_v4().to_string(), "budgetId": budget_id, "category": "Dining out", "limit": 20000, "used": 23400 }
            ]
        }),
    );
    budget_id
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => FrontendConfig::load(Path::new(&path))?,
        None => FrontendConfig::default(),
    }
    .with_env_overrides();
    init_logging(&config.log_filter)?;

    let user = CurrentUser {
        id: Uuid::new_v4().to_string(),
        name: "Demo User".to_string(),
        email: "demo@example.com".to_string(),
    };
    let gateway = Arc::new(MockGateway::new());
    let budget_id = seed(&gateway, &user);

    let app = AppContext::new(config, gateway, Arc::new(SessionStore::signed_in(user)));
    let watcher = app.start().await;

    let budgets = app.budget_state.budgets().get();
    let sidebar = budget_sidebar(&budgets, app.selection.selected_id().as_deref());
    for item in sidebar.items() {
        Logger::info_with_component("sidebar", &format!("{} [{}]", item.label, item.classes()));
    }

    if let Some(overview) = app.budget_state.load_overview(&budget_id).await {
        let summary = DashboardSummary::from_overview(&overview, &app.config.currency_symbol, app.config.locale);
        for tile in summary.tiles() {
            Logger::info_with_component("dashboard", &format!("{}: {}", tile.label, tile.value));
        }
    }

    app.envelope_state.load(&budget_id).await;
    for envelope in app.envelope_state.envelopes().get() {
        let category = envelope.category.clone();
        let card = EnvelopeCardProps::new(envelope, &app.config.envelopes, &app.config.currency_symbol);
        Logger::info_with_component(
            "envelope-card",
            &format!("{}: {} ({:?})", category, card.usage_label(), card.status()),
        );
    }

    if app.is_busy() {
        Logger::warn_with_component("app", &format!("{} requests still in flight at exit", app.busy().get()));
    }
    watcher.abort();
    Ok(())
}
