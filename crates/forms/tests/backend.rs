use std::{
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use api_types::{category::Category, entry::EntryType};
use axum::{Router, http::StatusCode};
use client::{CategoryService, ClientConfig, EntryService, ResourceService};
use forms::{
    CONNECTIVITY_FAILURE, CategoryForm, EntryForm, Mode, Navigation, Route, RouteHistory,
    SubmitOutcome, ToastQueue,
};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::Database;

async fn listen(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn backend() -> (CategoryService, EntryService) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = server::spawn_with_listener(engine, listener).unwrap();
    client::services(&ClientConfig {
        base_url: format!("http://{addr}"),
    })
    .unwrap()
}

/// Server answering every request with `status` and `body`, counting hits.
async fn stub(
    status: StatusCode,
    body: &'static str,
) -> ((CategoryService, EntryService), Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, [("content-type", "application/json")], body)
        }
    });
    let base_url = listen(app).await;
    (client::services(&ClientConfig { base_url }).unwrap(), hits)
}

fn category_form(service: CategoryService, path: &str) -> CategoryForm {
    CategoryForm::new(
        service,
        Route::parse(path),
        RouteHistory::default(),
        ToastQueue::default(),
    )
}

fn entry_form(entries: EntryService, categories: CategoryService, path: &str) -> EntryForm {
    EntryForm::new(
        entries,
        categories,
        Route::parse(path),
        RouteHistory::default(),
        ToastQueue::default(),
    )
}

#[tokio::test]
async fn created_category_round_trips() {
    let (categories, _) = backend().await;
    let mut form = category_form(categories.clone(), "new");
    form.init().await;
    form.form_mut().set_value("name", "Food");
    form.form_mut().set_value("description", "Groceries");

    let saved = match form.submit().await {
        SubmitOutcome::Saved(saved) => saved,
        other => panic!("expected a saved category, got {other:?}"),
    };
    let id = saved.id.unwrap();

    let fetched = categories.get_by_id(id).await.unwrap();
    assert_eq!(fetched.name, "Food");
    assert_eq!(fetched.description.as_deref(), Some("Groceries"));
    assert_eq!(
        form.navigator().navigations(),
        [
            Navigation {
                url: "categories".to_string(),
                skip_location_change: true,
            },
            Navigation {
                url: format!("categories/{id}/edit"),
                skip_location_change: false,
            },
        ]
    );
}

#[tokio::test]
async fn entry_embeds_the_category_as_it_is_at_send_time() {
    let (categories, entries) = backend().await;
    let created = categories
        .create(Category {
            id: None,
            name: "Food".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let category_id = created.id.unwrap();

    // A copy fetched moments earlier goes stale once the category changes.
    let stale = categories.get_by_id(category_id).await.unwrap();
    let current = categories
        .update(Category {
            name: "Groceries".to_string(),
            description: Some("Weekly shopping".to_string()),
            ..stale.clone()
        })
        .await
        .unwrap();

    let mut form = entry_form(entries.clone(), categories.clone(), "new");
    form.init().await;
    assert_eq!(form.category_options(), [current.clone()]);
    let fields = form.form_mut();
    fields.set_value("name", "Market");
    fields.set_value("amount", "54,20");
    fields.set_value("date", "2024-06-05");
    fields.set_value("categoryId", category_id);

    let saved = match form.submit().await {
        SubmitOutcome::Saved(saved) => saved,
        other => panic!("expected a saved entry, got {other:?}"),
    };

    assert_eq!(saved.category.as_ref(), Some(&current));
    assert_ne!(saved.category.as_ref(), Some(&stale));
    assert_eq!(saved.kind, EntryType::Expense);
    assert_eq!(saved.amount, Decimal::from_str("54.20").unwrap());
    assert!(saved.paid);

    let persisted = entries.get_by_id(saved.id.unwrap()).await.unwrap();
    assert_eq!(persisted.category, Some(current));
}

#[tokio::test]
async fn entry_edit_loads_record_options_and_saves() {
    let (categories, entries) = backend().await;
    let food = categories
        .create(Category {
            id: None,
            name: "Food".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let mut creating = entry_form(entries.clone(), categories.clone(), "new");
    creating.form_mut().set_value("name", "Market");
    creating.form_mut().set_value("amount", 12.5);
    creating.form_mut().set_value("date", "01/06/2024");
    creating.form_mut().set_value("categoryId", food.id.unwrap());
    let SubmitOutcome::Saved(created) = creating.submit().await else {
        panic!("entry was not created");
    };
    let id = created.id.unwrap();

    let mut form = entry_form(entries.clone(), categories.clone(), &format!("{id}/edit"));
    form.init().await;

    assert_eq!(form.mode(), Mode::Edit);
    assert_eq!(form.page_title(), "Editing entry: Market");
    assert_eq!(form.category_options(), [food]);
    assert_eq!(
        form.type_options(),
        [("expense", "Expense"), ("revenue", "Revenue")]
    );

    form.form_mut().set_value("type", "revenue");
    form.form_mut().set_value("paid", false);
    let SubmitOutcome::Saved(updated) = form.submit().await else {
        panic!("entry was not updated");
    };

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.kind, EntryType::Revenue);
    assert_eq!(updated.paid_text(), "Pending");
    assert_eq!(
        form.controller().navigator().location(),
        Some(format!("entries/{id}/edit").as_str())
    );
    assert_eq!(entries.get_by_id(id).await.unwrap(), updated);
}

#[tokio::test]
async fn validation_response_is_shown_verbatim() {
    let ((categories, _), hits) = stub(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"errors":["name is too short"]}"#,
    )
    .await;
    let mut form = category_form(categories, "new");
    form.form_mut().set_value("name", "Food");

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(form.server_error_messages(), ["name is too short"]);
    assert!(!form.is_submitting());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_error_collapses_to_one_generic_message() {
    let ((categories, _), _) = stub(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await;
    let mut form = category_form(categories, "new");
    form.form_mut().set_value("name", "Food");

    form.submit().await;

    assert_eq!(form.server_error_messages(), [CONNECTIVITY_FAILURE]);
}

#[tokio::test]
async fn invalid_entry_form_issues_no_request() {
    let ((categories, entries), hits) = stub(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
    let mut form = entry_form(entries, categories, "new");
    form.form_mut().set_value("name", "Market");
    form.form_mut().set_value("amount", "10");

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Blocked(_)));
    assert!(!form.can_submit());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_server_on_load_raises_alert() {
    let (categories, _) = client::services(&ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
    })
    .unwrap();
    let mut form = category_form(categories, "4/edit");

    form.init().await;

    assert_eq!(form.notifier().alerts(), [forms::LOAD_FAILURE_ALERT]);
    assert!(form.resource().is_none());
}

#[tokio::test]
async fn saved_category_form_does_not_create_twice() {
    let (categories, _) = backend().await;
    let mut form = category_form(categories.clone(), "new");
    form.form_mut().set_value("name", "Food");
    assert!(matches!(form.submit().await, SubmitOutcome::Saved(_)));

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Busy));
    assert_eq!(categories.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn large_amount_is_persisted_exactly() {
    let (categories, entries) = backend().await;
    let savings = categories
        .create(Category {
            id: None,
            name: "Savings".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let mut form = entry_form(entries.clone(), categories, "new");
    let fields = form.form_mut();
    fields.set_value("name", "Bond");
    fields.set_value("type", "revenue");
    fields.set_value("amount", "12345678901234567,89");
    fields.set_value("date", "2024-06-05");
    fields.set_value("categoryId", savings.id.unwrap());

    let SubmitOutcome::Saved(saved) = form.submit().await else {
        panic!("entry was not created");
    };

    let persisted = entries.get_by_id(saved.id.unwrap()).await.unwrap();
    assert_eq!(
        persisted.amount,
        Decimal::from_str("12345678901234567.89").unwrap()
    );
    assert_eq!(persisted.amount.to_string(), "12345678901234567.89");
}

#[tokio::test]
async fn category_options_stay_empty_when_loading_fails() {
    let (_, entries) = backend().await;
    let ((failing_categories, _), hits) = stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"database unavailable"}"#,
    )
    .await;
    let mut form = EntryForm::new(
        entries,
        failing_categories,
        Route::parse("new"),
        RouteHistory::default(),
        ToastQueue::default(),
    );

    form.init().await;

    assert!(form.category_options().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(form.controller().notifier().alerts().is_empty());
    assert_eq!(form.mode(), Mode::New);
    assert_eq!(form.type_options().len(), 2);
    form.form_mut().set_value("name", "Market");
    assert_eq!(form.form().get("name"), Some(&serde_json::json!("Market")));
}
