//! `pdft nup`: drives the async worker the same way an interactive front end would

use anyhow::{Context, Result, anyhow, bail};
use pdf_async_runtime::{DocumentId, NupCommand, NupStatistics, NupUpdate, worker_task};
use pdf_nup::NupOptions;
use pdf_nup::render::PdfiumBackend;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

pub async fn run(
    input: Vec<PathBuf>,
    output_dir: PathBuf,
    order: Option<Vec<usize>>,
    options: NupOptions,
    stats_only: bool,
) -> Result<()> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let cancel = Arc::new(AtomicBool::new(false));

    let worker = tokio::spawn(worker_task(
        command_rx,
        update_tx,
        PdfiumBackend::new,
        cancel.clone(),
    ));

    // Ctrl-C stops the batch after the document in progress
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, stopping after the current document");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    // Register inputs; files that fail to open are reported and skipped
    send(
        &command_tx,
        NupCommand::RegisterDocuments {
            paths: input.clone(),
        },
    )?;
    let mut documents: Vec<(DocumentId, PathBuf)> = Vec::new();
    let mut failed = 0;
    while documents.len() + failed < input.len() {
        match next_update(&mut update_rx).await? {
            NupUpdate::DocumentRegistered {
                doc_id,
                path,
                page_count,
            } => {
                println!("Loaded {} ({} pages)", path.display(), page_count);
                documents.push((doc_id, path));
            }
            NupUpdate::Error { message } => {
                log::error!("{}", message);
                failed += 1;
            }
            other => log::debug!("Ignoring {:?}", other),
        }
    }
    if documents.is_empty() {
        bail!("None of the input files could be opened");
    }

    if let Some(order) = order {
        let doc_id = documents[0].0;
        send(&command_tx, NupCommand::SetPageOrder { doc_id, order })?;
        match next_update(&mut update_rx).await? {
            NupUpdate::PageOrderChanged { order, .. } => log::info!("Page order: {:?}", order),
            NupUpdate::Error { message } => bail!(message),
            other => bail!("Unexpected update {:?}", other),
        }
    }

    for (doc_id, path) in &documents {
        send(
            &command_tx,
            NupCommand::CalculateStats {
                doc_id: *doc_id,
                options: options.clone(),
            },
        )?;
        match next_update(&mut update_rx).await? {
            NupUpdate::StatsCalculated { stats, .. } => {
                println!("{}:", path.display());
                print_statistics(&stats);
            }
            NupUpdate::Error { message } => log::error!("{}: {}", path.display(), message),
            other => bail!("Unexpected update {:?}", other),
        }
    }

    if stats_only {
        drop(command_tx);
        worker.await?;
        return Ok(());
    }

    send(
        &command_tx,
        NupCommand::Generate {
            options,
            output_dir,
        },
    )?;
    drop(command_tx);

    let outcome = match next_update(&mut update_rx).await? {
        NupUpdate::GenerateComplete { outputs, sheets } => {
            for output in &outputs {
                println!("N-up → {}", output.display());
            }
            println!("{} document(s), {} sheet(s)", outputs.len(), sheets);
            Ok(())
        }
        NupUpdate::Cancelled => Err(anyhow!("Cancelled")),
        NupUpdate::Error { message } => Err(anyhow!(message)),
        other => Err(anyhow!("Unexpected update {:?}", other)),
    };

    worker.await.context("Worker task failed")?;
    outcome
}

pub fn print_statistics(stats: &NupStatistics) {
    println!("N-up Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Pages per sheet: {}", stats.pages_per_sheet);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Empty slots: {}", stats.empty_slots);
}

fn send(tx: &mpsc::UnboundedSender<NupCommand>, command: NupCommand) -> Result<()> {
    tx.send(command)
        .map_err(|_| anyhow!("Worker stopped unexpectedly"))
}

/// Next update that is not progress; progress is printed as it passes
async fn next_update(rx: &mut mpsc::UnboundedReceiver<NupUpdate>) -> Result<NupUpdate> {
    loop {
        match rx.recv().await {
            Some(NupUpdate::Progress {
                operation,
                current,
                total,
                percent,
            }) => println!("[{:>3}%] {} {}/{}", percent, operation, current, total),
            Some(update) => return Ok(update),
            None => bail!("Worker stopped unexpectedly"),
        }
    }
}
