//! Catalog service layer over each repository backend.

use std::sync::Arc;

use transit_lab::config::CatalogSettings;
use transit_lab::db::{services, ModelRepository, RepositoryFactory, RepositoryType};
use transit_lab::models::{ModelId, ModelMetrics, ModelType, NewModel, BASE_MODEL_ID};

async fn exercise_catalog(repo: Arc<dyn ModelRepository>) {
    assert!(services::health_check(repo.as_ref()).await.unwrap());

    let record = services::register_model(
        repo.as_ref(),
        NewModel::new(ModelType::RandomForest.default_params())
            .with_name("forest-300")
            .with_metrics(ModelMetrics {
                accuracy: Some(0.91),
                roc_auc: Some(0.95),
                pr_auc: None,
            }),
    )
    .await
    .unwrap();
    assert_eq!(record.id, ModelId::new(2));

    let summaries = services::list_models(repo.as_ref()).await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[1].name, "forest-300");
    assert_eq!(summaries[1].accuracy, Some(0.91));
    assert_eq!(summaries[1].model_type, ModelType::RandomForest);

    let base = services::get_model(repo.as_ref(), BASE_MODEL_ID).await.unwrap();
    assert_eq!(
        services::resolve_model_path(repo.as_ref(), Some(ModelId::new(77)))
            .await
            .unwrap(),
        base.path
    );
}

#[tokio::test]
async fn test_local_catalog() {
    let repo = RepositoryFactory::create(&CatalogSettings::default())
        .await
        .unwrap();
    exercise_catalog(repo).await;
}

#[cfg(feature = "file-repo")]
#[tokio::test]
async fn test_file_catalog_persists_registrations() {
    let dir = tempfile::tempdir().unwrap();
    let settings = CatalogSettings {
        repository: RepositoryType::File,
        models_dir: dir.path().join("models"),
        path: dir.path().join("catalog.json"),
    };

    exercise_catalog(RepositoryFactory::create(&settings).await.unwrap()).await;

    let reopened = RepositoryFactory::create(&settings).await.unwrap();
    let summaries = services::list_models(reopened.as_ref()).await.unwrap();
    assert_eq!(summaries.len(), 2);

    let next = services::register_model(
        reopened.as_ref(),
        NewModel::new(ModelType::LightGbm.default_params()),
    )
    .await
    .unwrap();
    assert_eq!(next.id, ModelId::new(3));
}

#[test]
fn test_repository_type_names() {
    assert_eq!(RepositoryType::Local.to_string(), "local");
    assert_eq!("json".parse::<RepositoryType>().unwrap(), RepositoryType::File);
    assert!("postgres"
        .parse::<RepositoryType>()
        .unwrap_err()
        .contains("Unknown repository type"));
}
