use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::get_config;
use crate::i18n::{CatalogRegistry, DEFAULT_LOCALE, available_languages};
use crate::services::{LinkCreator, LinkService};
use crate::storage::{LinkRepository, LinkStore, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_store: Arc<dyn LinkStore>,
    pub link_creator: Arc<dyn LinkCreator>,
    pub i18n: Arc<CatalogRegistry>,
    pub admin_prefix: String,
}

/// 按配置创建翻译注册表并加载默认语言包
pub fn prepare_catalogs() -> Arc<CatalogRegistry> {
    let config = get_config();
    let registry = CatalogRegistry::from_config(&config.i18n);

    let locale = registry.locale();
    if registry.load_default_textdomain() {
        info!("Loaded translations for {}", locale);
    } else if locale != DEFAULT_LOCALE {
        warn!(
            "No usable catalog for {} in {} (available: {:?})",
            locale,
            registry.lang_dir().display(),
            available_languages(registry.lang_dir())
        );
    }

    Arc::new(registry)
}

/// 准备服务器启动的上下文
/// 包括存储、翻译注册表和链接服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let i18n = prepare_catalogs();

    let repository: Arc<dyn LinkRepository> = storage.clone();
    let link_service = LinkService::new(repository, config.admin.clone(), i18n.clone());
    let link_store: Arc<dyn LinkStore> = storage.clone();

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        link_store,
        link_creator: Arc::new(link_service),
        i18n,
        admin_prefix: config.admin.admin_prefix.clone(),
    })
}
