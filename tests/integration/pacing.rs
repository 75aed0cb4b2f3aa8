use std::sync::Arc;
use std::time::Duration;

use tokio_test::assert_ok;

use securewiper::{AppConfig, PassCount, RunStatus, Session};

use crate::fixtures;

#[tokio::test(start_paused = true)]
async fn test_single_pass_takes_twenty_sub_steps_and_finalization() {
    let mut session = Session::builder(AppConfig::default())
        .clock(fixtures::fixed_clock())
        .printer(Arc::new(fixtures::RecordingPrinter::default()))
        .seed(fixtures::SEED)
        .build()
        .unwrap();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::One).unwrap();

    let start = tokio::time::Instant::now();
    let status = session.start_run().await.unwrap();

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(start.elapsed(), Duration::from_millis(20 * 80 + 1000));
}

#[tokio::test(start_paused = true)]
async fn test_pacing_scales_with_configuration() {
    let mut config = AppConfig::default();
    config.apply_override("pacing.sub_steps_per_phase=2").unwrap();
    config.apply_override("pacing.sub_step_delay_ms=10").unwrap();
    config.apply_override("pacing.finalize_delay_ms=0").unwrap();

    let mut session = Session::builder(config)
        .clock(fixtures::fixed_clock())
        .seed(fixtures::SEED)
        .build()
        .unwrap();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::Three).unwrap();

    let start = tokio::time::Instant::now();
    assert_ok!(session.start_run().await);

    assert_eq!(start.elapsed(), Duration::from_millis(3 * 4 * 2 * 10));
}
