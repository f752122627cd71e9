use crate::{NupCommand, NupUpdate};
use pdf_nup::{
    BatchJob, BatchProgress, DocumentId, DocumentRegistry, NupError, NupOptions, RenderBackend,
    calculate_statistics, generate_batch, generate_preview, load_source,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// Async worker task that processes N-up commands and sends updates.
///
/// `make_backend` opens a fresh render backend on the blocking thread for
/// every preview or batch. Setting `cancel` stops a batch between documents,
/// including one that has not started yet; the flag is cleared once that
/// batch has ended.
pub async fn worker_task<B, F>(
    mut command_rx: mpsc::UnboundedReceiver<NupCommand>,
    update_tx: mpsc::UnboundedSender<NupUpdate>,
    make_backend: F,
    cancel: Arc<AtomicBool>,
) where
    B: RenderBackend + 'static,
    F: Fn() -> pdf_nup::Result<B> + Clone + Send + Sync + 'static,
{
    let mut worker = Worker {
        registry: DocumentRegistry::new(),
        make_backend,
        cancel,
        update_tx,
    };

    while let Some(cmd) = command_rx.recv().await {
        worker.process_command(cmd, &mut command_rx).await;
    }
}

struct Worker<F> {
    registry: DocumentRegistry,
    make_backend: F,
    cancel: Arc<AtomicBool>,
    update_tx: mpsc::UnboundedSender<NupUpdate>,
}

impl<B, F> Worker<F>
where
    B: RenderBackend + 'static,
    F: Fn() -> pdf_nup::Result<B> + Clone + Send + Sync + 'static,
{
    async fn process_command(
        &mut self,
        cmd: NupCommand,
        command_rx: &mut mpsc::UnboundedReceiver<NupCommand>,
    ) {
        match cmd {
            NupCommand::GeneratePreview {
                mut doc_id,
                mut options,
                mut max_sheets,
            } => {
                // Drain any queued preview commands, keeping only the most recent.
                // Anything else that was queued runs first, in order.
                let mut deferred = Vec::new();
                while let Ok(next_cmd) = command_rx.try_recv() {
                    if let NupCommand::GeneratePreview {
                        doc_id: new_doc_id,
                        options: new_options,
                        max_sheets: new_max_sheets,
                    } = next_cmd
                    {
                        log::debug!("Discarding queued preview generation, using newer request");
                        doc_id = new_doc_id;
                        options = new_options;
                        max_sheets = new_max_sheets;
                    } else {
                        deferred.push(next_cmd);
                    }
                }

                for next_cmd in deferred {
                    self.dispatch(next_cmd).await;
                }
                self.handle_generate_preview(doc_id, options, max_sheets)
                    .await;
            }
            other => self.dispatch(other).await,
        }
    }

    async fn dispatch(&mut self, cmd: NupCommand) {
        match cmd {
            NupCommand::RegisterDocuments { paths } => self.handle_register(paths).await,
            NupCommand::RemoveDocument { doc_id } => match self.registry.remove(doc_id) {
                Some(_) => self.send(NupUpdate::DocumentRemoved { doc_id }),
                None => self.send_error(NupError::UnknownDocument(doc_id)),
            },
            NupCommand::SetPageOrder { doc_id, order } => {
                let result = self.registry.set_page_order(doc_id, order);
                self.after_reorder(doc_id, result);
            }
            NupCommand::MovePage { doc_id, from, to } => {
                let result = self.registry.move_page(doc_id, from, to);
                self.after_reorder(doc_id, result);
            }
            NupCommand::ResetPageOrder { doc_id } => {
                let result = self.registry.reset_page_order(doc_id);
                self.after_reorder(doc_id, result);
            }
            NupCommand::GeneratePreview {
                doc_id,
                options,
                max_sheets,
            } => {
                self.handle_generate_preview(doc_id, options, max_sheets)
                    .await
            }
            NupCommand::CalculateStats { doc_id, options } => {
                let stats = self
                    .registry
                    .batch_item(doc_id)
                    .and_then(|item| calculate_statistics(&item, &options));
                match stats {
                    Ok(stats) => self.send(NupUpdate::StatsCalculated { doc_id, stats }),
                    Err(e) => self.send_error(e),
                }
            }
            NupCommand::Generate {
                options,
                output_dir,
            } => self.handle_generate(options, output_dir).await,
            NupCommand::LoadConfig { path } => match NupOptions::load(&path).await {
                Ok(options) => self.send(NupUpdate::ConfigLoaded { options }),
                Err(e) => self.send(NupUpdate::Error {
                    message: format!("Failed to load config {}: {e}", path.display()),
                }),
            },
            NupCommand::SaveConfig { path, options } => match options.save(&path).await {
                Ok(()) => self.send(NupUpdate::ConfigSaved { path }),
                Err(e) => self.send(NupUpdate::Error {
                    message: format!("Failed to save config {}: {e}", path.display()),
                }),
            },
        }
    }

    async fn handle_register(&mut self, paths: Vec<PathBuf>) {
        let total = paths.len();
        for (index, path) in paths.into_iter().enumerate() {
            match load_source(&path).await {
                Ok(source) => {
                    let page_count = source.page_count;
                    let doc_id = self.registry.insert(source);
                    self.send(NupUpdate::DocumentRegistered {
                        doc_id,
                        path,
                        page_count,
                    });
                }
                Err(e) => {
                    log::warn!("{}", e);
                    self.send_error(e);
                }
            }
            self.send_progress("Loading documents", index + 1, total);
        }
    }

    fn after_reorder(&mut self, doc_id: DocumentId, result: pdf_nup::Result<()>) {
        let order = result.and_then(|()| self.registry.page_order(doc_id).map(<[usize]>::to_vec));
        match order {
            Ok(order) => self.send(NupUpdate::PageOrderChanged { doc_id, order }),
            Err(e) => self.send_error(e),
        }
    }

    async fn handle_generate_preview(
        &mut self,
        doc_id: DocumentId,
        options: NupOptions,
        max_sheets: Option<usize>,
    ) {
        let item = match self.registry.batch_item(doc_id) {
            Ok(item) => item,
            Err(e) => return self.send_error(e),
        };

        match generate_preview(item, options, self.make_backend.clone(), max_sheets).await {
            Ok(sheets) => {
                log::info!("Generated {} preview sheet(s) for {}", sheets.len(), doc_id);
                self.send(NupUpdate::PreviewGenerated { doc_id, sheets });
            }
            Err(e) => self.send(NupUpdate::Error {
                message: format!("Failed to generate preview: {e}"),
            }),
        }
    }

    async fn handle_generate(&mut self, options: NupOptions, output_dir: PathBuf) {
        let job = BatchJob::new(self.registry.batch_items(), options, output_dir);

        // Forward batch progress as it arrives
        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<BatchProgress>();
        let update_tx = self.update_tx.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(progress) = progress_rx.recv().await {
                let _ = update_tx.send(NupUpdate::Progress {
                    operation: "Generating".to_string(),
                    current: progress.completed,
                    total: progress.total,
                    percent: progress.percent,
                });
            }
        });

        let result = generate_batch(
            job,
            self.make_backend.clone(),
            Some(progress_tx),
            self.cancel.clone(),
        )
        .await;
        let _ = forwarder.await;
        // A cancel only applies to the batch it interrupted
        self.cancel.store(false, Ordering::SeqCst);

        match result {
            Ok(summary) => self.send(NupUpdate::GenerateComplete {
                outputs: summary.outputs,
                sheets: summary.sheets,
            }),
            Err(NupError::Cancelled) => self.send(NupUpdate::Cancelled),
            Err(e) => self.send(NupUpdate::Error {
                message: format!("Failed to generate: {e}"),
            }),
        }
    }

    fn send_progress(&self, operation: &str, current: usize, total: usize) {
        let progress = BatchProgress::new(current, total);
        self.send(NupUpdate::Progress {
            operation: operation.to_string(),
            current,
            total,
            percent: progress.percent,
        });
    }

    fn send_error(&self, error: NupError) {
        self.send(NupUpdate::Error {
            message: error.to_string(),
        });
    }

    fn send(&self, update: NupUpdate) {
        let _ = self.update_tx.send(update);
    }
}
