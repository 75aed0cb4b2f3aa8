//! Sanitization run state machine

use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{Pacer, WipePhase};
use crate::certificate::builder::{self, CertificateInputs};
use crate::config::{PacingConfig, ProductConfig, SimulationConfig};
use crate::error::Result;
use crate::hash::Digester;
use crate::telemetry::{Telemetry, TelemetryEvent};
use crate::types::{CertificateRecord, RunStatus, TargetFile};
use crate::utils::{generate_certificate_id, Clock};

/// Bytes of synthetic residue fingerprinted after the last pass
const RESIDUE_LEN: usize = 32;

/// Characters of the pre-wipe digest echoed to the log
const FINGERPRINT_PREVIEW: usize = 32;

/// Drives one run at a time over the collaborators it was built with
pub struct Simulator {
    digester: Arc<dyn Digester>,
    pacer: Arc<dyn Pacer>,
    clock: Arc<dyn Clock>,
    pacing: PacingConfig,
    product: ProductConfig,
}

impl Simulator {
    pub fn new(
        digester: Arc<dyn Digester>,
        pacer: Arc<dyn Pacer>,
        clock: Arc<dyn Clock>,
        pacing: PacingConfig,
        product: ProductConfig,
    ) -> Self {
        Self {
            digester,
            pacer,
            clock,
            pacing,
            product,
        }
    }

    pub fn digester(&self) -> &dyn Digester {
        self.digester.as_ref()
    }

    /// Runs the full pass/phase/sub-step sequence against `target`
    ///
    /// A collaborator failure is logged as a critical failure and leaves the
    /// telemetry in `Failed`; the error is still returned to the caller.
    #[instrument(
        skip_all,
        fields(run_id = %Uuid::new_v4(), target = %target.name, passes = %config.pass_count)
    )]
    pub async fn run(
        &self,
        telemetry: &mut Telemetry,
        rng: &mut (dyn RngCore + Send),
        target: &TargetFile,
        config: SimulationConfig,
    ) -> Result<CertificateRecord> {
        telemetry.set_status(RunStatus::Running);
        telemetry.reset_progress();
        telemetry.clear_log();

        match self.execute(telemetry, rng, target, config).await {
            Ok(record) => {
                info!(certificate_id = %record.certificate_id, "✅ Run completed");
                Ok(record)
            }
            Err(e) => {
                warn!("❌ Run failed: {}", e);
                telemetry.error(format!("CRITICAL FAILURE: {}", e));
                telemetry.set_status(RunStatus::Failed);
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        telemetry: &mut Telemetry,
        rng: &mut (dyn RngCore + Send),
        target: &TargetFile,
        config: SimulationConfig,
    ) -> Result<CertificateRecord> {
        let algorithm = self.digester.algorithm();
        telemetry.warning(format!("PROTOCOL INITIATED: {}", config.tier().protocol()));

        telemetry.info(format!("Calculating pre-wipe {} fingerprint...", algorithm.label()));
        let bytes = target.read_bytes().await?;
        let pre_wipe_hash = self.digester.digest(&bytes)?;
        let preview: String = pre_wipe_hash.chars().take(FINGERPRINT_PREVIEW).collect();
        telemetry.success(format!("Fingerprint: {}...", preview));

        self.overwrite(telemetry, rng, config).await?;

        telemetry.warning("Finalizing hardware synchronization...");
        self.pacer.pause(self.pacing.finalize_delay()).await;

        let mut residue = [0u8; RESIDUE_LEN];
        rng.fill_bytes(&mut residue);
        let post_wipe_hash = self.digester.digest(&residue)?;
        telemetry.success("Data destruction verified. Storage space reclaimed.");

        let now = self.clock.now();
        let certificate_id = generate_certificate_id(&self.product.certificate_prefix, &now, rng);
        let record = builder::build(
            CertificateInputs {
                target: target.metadata(),
                pass_count: config.pass_count,
                pre_wipe_hash,
                post_wipe_hash,
                hash_algorithm: algorithm,
                certificate_id,
                wipe_timestamp: now,
            },
            &self.product,
        );

        telemetry.set_status(RunStatus::Completed);
        telemetry.success(format!("CERTIFICATE ISSUED: {}", record.certificate_id));
        telemetry.publish(TelemetryEvent::CertificateIssued(record.certificate_id.clone()));
        telemetry.complete();

        Ok(record)
    }

    async fn overwrite(
        &self,
        telemetry: &mut Telemetry,
        rng: &mut (dyn RngCore + Send),
        config: SimulationConfig,
    ) -> Result<()> {
        let passes = config.pass_count.get();
        let total = config.total_steps();
        let mut completed = 0;

        for pass in 1..=passes {
            for phase in WipePhase::ALL {
                telemetry.info(format!("Pass {}/{} | Phase: {}", pass, passes, phase.name()));

                for _ in 0..self.pacing.sub_steps_per_phase {
                    telemetry.set_sector(phase.sector_label(rng))?;
                    self.pacer.pause(self.pacing.sub_step_delay()).await;
                }

                completed += 1;
                // 100% is only reported once the certificate is issued.
                if completed < total {
                    telemetry.advance(completed, total);
                }
                debug!(pass, phase = %phase, completed, total, "phase complete");
            }
        }

        Ok(())
    }
}
