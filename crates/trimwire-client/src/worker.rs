// crates/trimwire-client/src/worker.rs
//
// ProcessWorker: owns the HTTP client and the result channel back to the
// UI. One settlement thread per submission; the single-flight rule is
// enforced upstream by SubmissionController, so at most one is ever live.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use crossbeam_channel::{bounded, Receiver, Sender};
use reqwest::blocking::Client;

use trimwire_core::job::{ProcessJob, ProcessUpdate};

use crate::endpoint::ServerConfig;
use crate::request::{probe_health, send_job};

pub struct ProcessWorker {
    /// Settlements and probe results, drained by the UI each frame.
    pub rx:   Receiver<ProcessUpdate>,
    tx:       Sender<ProcessUpdate>,
    client:   Client,
    config:   ServerConfig,
    shutdown: Arc<AtomicBool>,
}

impl ProcessWorker {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        // Transport defaults throughout; no explicit timeout policy.
        let client = Client::builder()
            .build()
            .context("could not build the HTTP client")?;
        let (tx, rx) = bounded(64);
        Ok(Self {
            rx,
            tx,
            client,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Fire the startup health probe. The result arrives as ServerStatus;
    /// the indicator is informative only and never gates submissions.
    pub fn probe_server(&self) {
        let client = self.client.clone();
        let url    = self.config.health_url();
        let tx     = self.tx.clone();
        let sd     = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            if sd.load(Ordering::Relaxed) { return; }
            let online = probe_health(&client, &url);
            log::info!("service at {url} is {}", if online { "online" } else { "offline" });
            let _ = tx.send(ProcessUpdate::ServerStatus { online });
        });
    }

    /// Spawn the settlement thread for one frozen job. Exactly one request
    /// leaves it, and it reports Done or Failed, never both.
    pub fn submit(&self, job: ProcessJob) {
        let client = self.client.clone();
        let url    = self.config.process_url();
        let tx     = self.tx.clone();
        let sd     = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            if sd.load(Ordering::Relaxed) { return; }

            let job_id = job.job_id;
            let format = job.format;
            log::info!(
                "job {job_id}: sending {} ({} bytes) action={} format={}",
                job.clip.name,
                job.clip.size_bytes(),
                job.action.wire_name(),
                format.wire_name(),
            );

            let update = match send_job(&client, &url, &job) {
                Ok(bytes) => {
                    log::info!("job {job_id}: received {} bytes of processed audio", bytes.len());
                    ProcessUpdate::Done { job_id, format, bytes }
                }
                Err(error) => {
                    log::warn!("job {job_id}: {error}");
                    ProcessUpdate::Failed { job_id, error }
                }
            };
            let _ = tx.send(update);
        });
    }

    /// Stop accepting new work. A settlement already past the flag check
    /// finishes normally; its send is ignored once the receiver is gone.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
