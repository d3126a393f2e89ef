use ad_wall::ads::{Ad, AdContent, AdId, FormConfig, FormConfigError};
use ad_wall::config::FormSettings;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listings the wall starts with on a fresh boot.
pub(crate) fn seed_ads() -> Vec<Ad> {
    let seed = |id: u64, title: &str, publisher: &str, content: &str, price: f64, clicked: u64| {
        let mut ad = Ad::new(
            AdId(id),
            AdContent {
                title: title.to_string(),
                publisher: publisher.to_string(),
                content: content.to_string(),
                landing_url: "#".to_string(),
                price,
            },
        );
        ad.clicked = clicked;
        ad
    };

    vec![
        seed(
            1,
            "我是标题1",
            "淘宝联盟",
            "这里是广告文案内容，它将尝试占据至少两行空间，以保持卡片的视觉平衡。",
            123.0,
            123,
        ),
        seed(2, "广告标题2", "阿里云", "简洁的广告内容。", 100.0, 100),
        seed(
            3,
            "广告标题3",
            "极客时间",
            "这是一个较长的内容描述，用于测试卡片在横向布局下的自适应和换行效果。",
            3.0,
            3,
        ),
    ]
}

pub(crate) fn load_form_config(settings: &FormSettings) -> Result<FormConfig, FormConfigError> {
    match &settings.form_config_path {
        Some(path) => {
            let config = FormConfig::from_path(path)?;
            info!(path = %path.display(), fields = config.fields().len(), "loaded form config");
            Ok(config)
        }
        None => Ok(FormConfig::standard()),
    }
}
