//! End-to-end turns against a scripted model, a mock store and in-memory SQLite.

use std::sync::Arc;
use std::time::Duration;

use aquabot_database::{conversation, product_inquiry, user, Database, MessageRole};
use brain_core::{ChatModel, ChatRole};
use mock_brain::{sample_product, CommerceCall, DelayedModel, MockCommerce, ScriptedModel};
use orchestrator::{
    CatalogKnowledge, ModelStage, OrchestratorConfig, OrchestratorError, SalesOrchestrator,
    EMPTY_REPLY, FALLBACK_REPLY,
};
use serde_json::Value;

struct Harness {
    orchestrator: SalesOrchestrator,
    db: Database,
    user_id: i64,
}

async fn harness(model: Arc<dyn ChatModel>, store: Arc<MockCommerce>) -> Harness {
    harness_with_config(model, store, OrchestratorConfig::default()).await
}

async fn harness_with_config(
    model: Arc<dyn ChatModel>,
    store: Arc<MockCommerce>,
    config: OrchestratorConfig,
) -> Harness {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    let customer = user::find_or_create_user(db.pool(), 5551234, "Carlos", None, None)
        .await
        .unwrap();

    let knowledge = Arc::new(CatalogKnowledge::from_text(
        "Suavizador 30k: remueve dureza hasta 30,000 granos",
    ));
    let orchestrator = SalesOrchestrator::new(
        model,
        sales_tools::default_registry(store),
        db.clone(),
        knowledge,
        config,
    );

    Harness {
        orchestrator,
        db,
        user_id: customer.id,
    }
}

fn stock_store() -> Arc<MockCommerce> {
    Arc::new(MockCommerce::with_products(vec![
        sample_product(42, "Bomba periférica 1HP", true, Some(3)),
        sample_product(7, "Filtro de sedimentos", false, None),
    ]))
}

async fn stored_contents(h: &Harness) -> Vec<(MessageRole, String)> {
    conversation::recent_messages(h.db.pool(), h.user_id, 100)
        .await
        .unwrap()
        .into_iter()
        .map(|m| (m.role, m.content))
        .collect()
}

#[tokio::test]
async fn direct_reply_is_persisted_without_capabilities() {
    let model = Arc::new(ScriptedModel::new().reply_text("¡Hola! ¿Qué problema tienes con el agua?"));
    let store = stock_store();
    let h = harness(model.clone(), store.clone()).await;

    let outcome = h.orchestrator.process_turn(h.user_id, "Hola").await.unwrap();

    assert_eq!(outcome.reply, "¡Hola! ¿Qué problema tienes con el agua?");
    assert_eq!(outcome.capability, None);
    assert_eq!(store.call_count(), 0);

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].functions.len(), 4);
    let messages = &requests[0].messages;
    assert_eq!(messages[0].role, ChatRole::System);
    let system = messages[0].content.as_deref().unwrap();
    assert!(system.contains("Aquaequipos"));
    assert!(system.contains("Suavizador 30k"));
    assert_eq!(messages.last().unwrap().role, ChatRole::User);
    assert_eq!(messages.last().unwrap().content.as_deref(), Some("Hola"));

    assert_eq!(
        stored_contents(&h).await,
        vec![
            (MessageRole::User, "Hola".to_string()),
            (
                MessageRole::Assistant,
                "¡Hola! ¿Qué problema tienes con el agua?".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn capability_round_trip_feeds_result_to_second_call() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply_call("checkStock", r#"{"productId":42}"#)
            .reply_text("Sí, nos quedan 3 unidades de la bomba."),
    );
    let store = stock_store();
    let h = harness(model.clone(), store.clone()).await;

    let outcome = h
        .orchestrator
        .process_turn(h.user_id, "¿Tienen la bomba 42?")
        .await
        .unwrap();

    assert_eq!(outcome.reply, "Sí, nos quedan 3 unidades de la bomba.");
    assert_eq!(outcome.capability.as_deref(), Some("checkStock"));
    assert_eq!(store.calls(), vec![CommerceCall::GetProduct(42)]);

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].offers_functions());
    assert!(!requests[1].offers_functions());

    let follow_up = &requests[1].messages;
    let call_message = &follow_up[follow_up.len() - 2];
    assert_eq!(call_message.role, ChatRole::Assistant);
    assert_eq!(call_message.function_call.as_ref().unwrap().name, "checkStock");

    let result_message = follow_up.last().unwrap();
    assert_eq!(result_message.role, ChatRole::Function);
    assert_eq!(result_message.name.as_deref(), Some("checkStock"));
    let payload: Value = serde_json::from_str(result_message.content.as_deref().unwrap()).unwrap();
    assert_eq!(payload["success"], true);
    assert_eq!(payload["quantity"], 3);
    assert_eq!(payload["message"], "Producto disponible (3 unidades)");

    // Function messages are not stored
    let stored = stored_contents(&h).await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], (MessageRole::User, "¿Tienen la bomba 42?".to_string()));

    let inquiries = product_inquiry::list_inquiries(h.db.pool(), h.user_id, 10)
        .await
        .unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].product_name, "Producto #42");
    assert_eq!(inquiries[0].query, "¿Tienen la bomba 42?");
    assert_eq!(
        inquiries[0].response.as_deref(),
        Some("Sí, nos quedan 3 unidades de la bomba.")
    );
}

#[tokio::test]
async fn product_details_inquiry_uses_product_name() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply_call("getProductDetails", r#"{"productId":7}"#)
            .reply_text("El filtro está agotado por ahora."),
    );
    let h = harness(model, stock_store()).await;

    h.orchestrator
        .process_turn(h.user_id, "Detalles del filtro")
        .await
        .unwrap();

    let inquiries = product_inquiry::list_inquiries(h.db.pool(), h.user_id, 10)
        .await
        .unwrap();
    assert_eq!(inquiries[0].product_name, "Filtro de sedimentos");
}

#[tokio::test]
async fn unknown_capability_is_reported_to_model() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply_call("getWeather", "{}")
            .reply_text("No tengo esa información, pero puedo ayudarte con bombas."),
    );
    let store = stock_store();
    let h = harness(model.clone(), store.clone()).await;

    let outcome = h
        .orchestrator
        .process_turn(h.user_id, "¿Va a llover?")
        .await
        .unwrap();

    assert_eq!(outcome.capability.as_deref(), Some("getWeather"));
    assert_eq!(store.call_count(), 0);

    let requests = model.requests();
    let result = requests[1].messages.last().unwrap();
    let payload: Value = serde_json::from_str(result.content.as_deref().unwrap()).unwrap();
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"], "Función no encontrada: getWeather");

    assert_eq!(stored_contents(&h).await.len(), 2);
    let inquiries = product_inquiry::list_inquiries(h.db.pool(), h.user_id, 10)
        .await
        .unwrap();
    assert!(inquiries.is_empty());
}

#[tokio::test]
async fn commerce_failure_still_completes_turn() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply_call("searchProducts", r#"{"query":"bomba sumergible"}"#)
            .reply_text("Ahora mismo no puedo consultar el catálogo, ¿te contacto luego?"),
    );
    let store = Arc::new(MockCommerce::failing());
    let h = harness(model.clone(), store.clone()).await;

    let outcome = h
        .orchestrator
        .process_turn(h.user_id, "Busco bomba sumergible")
        .await
        .unwrap();

    assert_eq!(
        outcome.reply,
        "Ahora mismo no puedo consultar el catálogo, ¿te contacto luego?"
    );
    assert_eq!(
        store.calls(),
        vec![CommerceCall::Search {
            query: "bomba sumergible".to_string(),
            limit: 5
        }]
    );

    let result = model.requests()[1].messages.last().cloned().unwrap();
    let payload: Value = serde_json::from_str(result.content.as_deref().unwrap()).unwrap();
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"], "Error al buscar productos");

    assert_eq!(stored_contents(&h).await.len(), 2);
    let inquiries = product_inquiry::list_inquiries(h.db.pool(), h.user_id, 10)
        .await
        .unwrap();
    assert_eq!(inquiries[0].product_name, "bomba sumergible");
}

#[tokio::test]
async fn model_failure_persists_nothing() {
    let model = Arc::new(ScriptedModel::new().fail("upstream 500").fail("upstream 500"));
    let h = harness(model, stock_store()).await;

    let err = h
        .orchestrator
        .process_turn(h.user_id, "Hola")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::Model {
            stage: ModelStage::Initial,
            ..
        }
    ));

    let reply = h.orchestrator.respond(h.user_id, "Hola").await;
    assert_eq!(reply, FALLBACK_REPLY);

    assert!(stored_contents(&h).await.is_empty());
}

#[tokio::test]
async fn follow_up_failure_persists_nothing() {
    let model = Arc::new(
        ScriptedModel::new()
            .reply_call("checkStock", r#"{"productId":42}"#)
            .fail("connection reset"),
    );
    let store = stock_store();
    let h = harness(model, store.clone()).await;

    let err = h
        .orchestrator
        .process_turn(h.user_id, "¿Hay stock?")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Model {
            stage: ModelStage::FollowUp,
            ..
        }
    ));
    assert_eq!(store.call_count(), 1);
    assert!(stored_contents(&h).await.is_empty());
}

#[tokio::test]
async fn malformed_arguments_fail_the_turn() {
    let model = Arc::new(ScriptedModel::new().reply_call("checkStock", "{productId: 42"));
    let store = stock_store();
    let h = harness(model.clone(), store.clone()).await;

    let err = h
        .orchestrator
        .process_turn(h.user_id, "¿Hay stock?")
        .await
        .unwrap_err();

    match err {
        OrchestratorError::MalformedCapabilityArguments { capability, .. } => {
            assert_eq!(capability, "checkStock")
        }
        other => panic!("Expected MalformedCapabilityArguments, got {:?}", other),
    }
    assert_eq!(model.request_count(), 1);
    assert_eq!(store.call_count(), 0);
    assert!(stored_contents(&h).await.is_empty());
}

#[tokio::test]
async fn empty_model_text_uses_fixed_reply() {
    let model = Arc::new(ScriptedModel::new().reply_text(""));
    let h = harness(model, stock_store()).await;

    let outcome = h.orchestrator.process_turn(h.user_id, "...").await.unwrap();

    assert_eq!(outcome.reply, EMPTY_REPLY);
    assert_eq!(stored_contents(&h).await[1].1, EMPTY_REPLY);
}

#[tokio::test]
async fn history_is_sent_oldest_first_and_pruned() {
    let mut script = ScriptedModel::new();
    for i in 0..12 {
        script = script.reply_text(format!("respuesta {}", i));
    }
    let model = Arc::new(script);
    let config = OrchestratorConfig::default().with_history(4, 6);
    let h = harness_with_config(model.clone(), stock_store(), config).await;

    for i in 0..12 {
        h.orchestrator
            .process_turn(h.user_id, &format!("pregunta {}", i))
            .await
            .unwrap();
    }

    // System prompt + 4 stored messages + the new message
    let last = model.requests().pop().unwrap();
    let contents: Vec<&str> = last
        .messages
        .iter()
        .skip(1)
        .filter_map(|m| m.content.as_deref())
        .collect();
    assert_eq!(
        contents,
        vec![
            "pregunta 9",
            "respuesta 9",
            "pregunta 10",
            "respuesta 10",
            "pregunta 11"
        ]
    );

    let stored = stored_contents(&h).await;
    assert_eq!(stored.len(), 6);
    assert_eq!(stored[0], (MessageRole::User, "pregunta 9".to_string()));
    assert_eq!(stored[5], (MessageRole::Assistant, "respuesta 11".to_string()));
}

#[tokio::test]
async fn slow_turn_times_out_with_fallback() {
    let model = Arc::new(DelayedModel::with_millis(
        ScriptedModel::new().reply_text("demasiado tarde"),
        500,
    ));
    let h = harness(model, stock_store()).await;

    let reply = h
        .orchestrator
        .respond_with_timeout(h.user_id, "Hola", Duration::from_millis(20))
        .await;

    assert_eq!(reply, FALLBACK_REPLY);
    assert!(stored_contents(&h).await.is_empty());
}

#[tokio::test]
async fn slow_write_after_timely_reply_is_not_a_timeout() {
    let model = Arc::new(DelayedModel::with_millis(
        ScriptedModel::new()
            .reply_call("checkStock", r#"{"productId":42}"#)
            .reply_text("Sí, nos quedan 3 unidades."),
        150,
    ));
    let h = harness(model, stock_store()).await;

    // Hold the only pooled connection while the model runs, so the writes
    // finish well after the turn deadline.
    let hold_connection = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let conn = h.db.pool().acquire().await.unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
        drop(conn);
    };

    let (reply, ()) = tokio::join!(
        h.orchestrator
            .respond_with_timeout(h.user_id, "¿Tienen la bomba 42?", Duration::from_millis(400)),
        hold_connection
    );

    assert_eq!(reply, "Sí, nos quedan 3 unidades.");
    assert_eq!(
        stored_contents(&h).await,
        vec![
            (MessageRole::User, "¿Tienen la bomba 42?".to_string()),
            (MessageRole::Assistant, "Sí, nos quedan 3 unidades.".to_string()),
        ]
    );
    let inquiries = product_inquiry::list_inquiries(h.db.pool(), h.user_id, 10)
        .await
        .unwrap();
    assert_eq!(inquiries.len(), 1);
}
