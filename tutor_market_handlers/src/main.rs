//! Local invocation shim: reads an event payload from stdin, dispatches to the named handler, and prints the
//! response envelope. The deployed runtime wires the same handlers to the invocation platform instead.
use std::io::Read;

use dotenvy::dotenv;
use log::info;
use serde_json::json;
use tutor_market_engine::{PaymentFlowApi, RandomDecider, SettlementApi};
use tutor_market_handlers::{
    config::HandlerConfig,
    errors::HandlerError,
    events::{LambdaRequest, LambdaResponse, MessageBatch},
    handlers,
    runtime::{EnvCredentialProvider, LoggingChannel, Runtime},
    worker,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let name = match std::env::args().nth(1) {
        Some(name) => name,
        None => {
            eprintln!("Usage: tutor_market_handlers <handler-name> < event.json");
            std::process::exit(2);
        },
    };
    let mut raw = String::new();
    if std::io::stdin().read_to_string(&mut raw).is_err() || raw.trim().is_empty() {
        raw = "{}".to_string();
    }
    let response = match try_invoke(&name, &raw).await {
        Ok(response) => response,
        Err(e) => LambdaResponse::from(e),
    };
    match serde_json::to_string_pretty(&response) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("{e}"),
    }
}

const HANDLER_NAMES: [&str; 8] = [
    "buscar-professores",
    "cadastrar-aluno",
    "atualizar-aluno",
    "criar-conexao",
    "gerar-pagamento",
    "get-conexoes",
    "get-pagamentos",
    "processa-pagamento",
];

async fn try_invoke(name: &str, raw: &str) -> Result<LambdaResponse, HandlerError> {
    // An unknown name is a caller error; it must not cost a credential fetch or a connection.
    if !HANDLER_NAMES.contains(&name) {
        return Err(HandlerError::Validation(format!("Unknown handler '{name}'")));
    }
    let config = HandlerConfig::from_env()?;
    info!("🚀️ Invoking handler '{name}' in region {}", config.region);
    let runtime = Runtime::new(config, EnvCredentialProvider);

    if name == "processa-pagamento" {
        let batch: MessageBatch = serde_json::from_str(raw)
            .map_err(|e| HandlerError::Validation(format!("The batch payload is not valid JSON. {e}")))?;
        let db = runtime.database().await?;
        let api = SettlementApi::new(db, RandomDecider);
        let outcome = worker::handle_batch(&api, batch).await;
        return LambdaResponse::json(
            200,
            &json!({
                "updates_executed": outcome.updates_executed,
                "paid": outcome.paid,
                "cancelled": outcome.cancelled,
                "failed": outcome.failure_count(),
            }),
        );
    }

    let request: LambdaRequest = serde_json::from_str(raw)
        .map_err(|e| HandlerError::Validation(format!("The event payload is not valid JSON. {e}")))?;
    if request.is_preflight() {
        return Ok(LambdaResponse::preflight());
    }
    let db = runtime.database().await?;
    let response = match name {
        "buscar-professores" => handlers::search_tutors(&db, &request).await,
        "cadastrar-aluno" => handlers::register_student(&db, &request).await,
        "atualizar-aluno" => handlers::update_student(&db, &request).await,
        "criar-conexao" => handlers::create_engagement(&db, &request).await,
        "gerar-pagamento" => {
            let queue_url = runtime.config().queue_url()?.to_string();
            let api = PaymentFlowApi::new(db, LoggingChannel::new(queue_url));
            handlers::create_payment(&api, &request).await
        },
        "get-conexoes" => handlers::engagements_by_student(&db, &request).await,
        "get-pagamentos" => handlers::payments_by_student(&db, &request).await,
        _ => return Err(HandlerError::Validation(format!("Unknown handler '{name}'"))),
    };
    Ok(response)
}
