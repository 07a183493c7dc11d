pub mod bookkeeping;
pub mod config;
pub mod control;
pub mod driver;
pub mod evaluator;
pub mod limit;
pub mod replacement;
pub mod search;
pub mod summary;

pub use bookkeeping::post_generation_bookkeeping;
pub use config::{EvolutionConfig, EvolutionConfigBuilder};
pub use control::EngineControl;
pub use driver::{EvolutionDriver, Strategy};
pub use evaluator::{CachingEvaluator, Evaluator, GaEvaluator, PenaltyEvaluator, RandomEvaluator};
pub use limit::Limit;
pub use replacement::{alps_replace, steady_state_replace};
pub use search::{DssSampler, Search, Split};
pub use summary::Summary;

pub use vita_error::{VitaError, ensure, vita_err};

pub(crate) type Result<T> = std::result::Result<T, VitaError>;

pub fn init_logging() {
    pub use std::sync::Once;
    static INIT_LOGGING: Once = Once::new();

    INIT_LOGGING.call_once(|| {
        use tracing_subscriber::fmt::format::FmtSpan;
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        std::panic::set_hook(Box::new(|info| {
            tracing::error!("PANIC: {}", info);
        }));

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                    .with_target(false)
                    .with_level(true)
                    .compact(),
            )
            .init();
    });
}
