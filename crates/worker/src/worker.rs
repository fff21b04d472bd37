//! Generation job consumer.
//!
//! Polls the durable queue, claims jobs with `FOR UPDATE SKIP LOCKED`, and
//! drives each generation through `QUEUED -> PROCESSING -> {DONE, FAILED}`.
//! The `PROCESSING` transition is a compare-and-swap, so a duplicate job
//! for the same generation is a safe no-op.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use storyforge_core::artifacts::ArtifactStore;
use storyforge_core::copywriter::CopyContext;
use storyforge_core::error::CoreError;
use storyforge_core::render;
use storyforge_core::template::ALL_TEMPLATES;
use storyforge_core::types::DbId;
use storyforge_db::models::generation::GenerationJobContext;
use storyforge_db::repositories::{GenerationRepo, JobRepo, StoryVariantRepo};
use storyforge_gigachat::ContentGenerator;

/// Default polling interval for the worker loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that abort one pipeline run and mark the request `FAILED`.
///
/// Content generation is absent here on purpose: the generator's fallback
/// guarantee means only rendering, storage, and database failures can fail
/// a job.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to serialize story lines: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Long-lived consumer of the generation job queue.
pub struct GenerationWorker {
    pool: PgPool,
    generator: Arc<dyn ContentGenerator>,
    store: ArtifactStore,
    poll_interval: Duration,
}

impl GenerationWorker {
    /// Create a worker with the default 1-second poll interval.
    pub fn new(pool: PgPool, generator: Arc<dyn ContentGenerator>, store: ArtifactStore) -> Self {
        Self {
            pool,
            generator,
            store,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run the polling loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Generation worker started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Generation worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.drain_queue().await {
                        tracing::error!(error = %e, "Queue drain cycle failed");
                    }
                }
            }
        }
    }

    /// Claim and process jobs until the queue is empty.
    async fn drain_queue(&self) -> Result<(), sqlx::Error> {
        while let Some(generation_id) = JobRepo::claim_next(&self.pool).await? {
            self.process(generation_id).await?;
        }
        Ok(())
    }

    /// Execute one claimed job.
    ///
    /// A missing request means it was deleted out-of-band: the job is
    /// dropped silently. A failed `QUEUED -> PROCESSING` swap means another
    /// worker owns the generation (or it already finished): also a no-op.
    /// Any pipeline error is caught once and recorded on the request.
    pub async fn process(&self, generation_id: DbId) -> Result<(), sqlx::Error> {
        let Some(context) = GenerationRepo::load_job_context(&self.pool, generation_id).await?
        else {
            tracing::debug!(generation_id, "Request gone before processing, dropping job");
            return Ok(());
        };

        if !GenerationRepo::mark_processing(&self.pool, generation_id).await? {
            tracing::info!(
                generation_id,
                status = %context.status,
                "Request not in QUEUED state, skipping job",
            );
            return Ok(());
        }

        match self.run_pipeline(&context).await {
            Ok(()) => {
                GenerationRepo::complete(&self.pool, generation_id).await?;
                tracing::info!(generation_id, "Generation completed");
            }
            Err(e) => {
                tracing::error!(generation_id, error = %e, "Generation failed");
                GenerationRepo::fail(&self.pool, generation_id, &e.to_string()).await?;
            }
        }
        Ok(())
    }

    /// Generate copy, then render / store / persist the six variants in
    /// fixed template order.
    async fn run_pipeline(&self, context: &GenerationJobContext) -> Result<(), PipelineError> {
        // Regeneration clears prior variants, keeping reprocessing
        // idempotent.
        let cleared =
            StoryVariantRepo::delete_for_generation(&self.pool, context.id).await?;
        if cleared > 0 {
            tracing::info!(
                generation_id = context.id,
                cleared,
                "Cleared prior variants before regeneration",
            );
        }

        let ctx = CopyContext {
            offer_text: context.offer_text.clone(),
            room_label: context.room_label.clone(),
            complex_name: context.complex_name.clone(),
            developer_name: context.developer_name.clone(),
        };
        let variants = self.generator.generate_variants(&ctx).await;

        for (lines, template) in variants.iter().zip(ALL_TEMPLATES) {
            let png = render::render_png(lines, template)?;
            let stored = self.store.save(&png).await?;
            let lines_json = serde_json::to_value(lines)?;
            StoryVariantRepo::insert(
                &self.pool,
                context.id,
                template.as_str(),
                &lines_json,
                &stored.url,
            )
            .await?;
        }

        Ok(())
    }
}
