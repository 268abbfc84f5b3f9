use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 로그 구독자를 초기화한다. 기본 수준은 warn이며 RUST_LOG로 바꿀 수 있다.
///
/// 표준 출력은 메뉴/보고서가 쓰므로 로그는 표준 에러로 보낸다.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
