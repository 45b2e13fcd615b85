use std::{
    fs::{File, OpenOptions},
    io::BufReader,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
};

pub use cli::CLIParser;
pub use error::Error;
pub use image::{ChannelValue, ColorChannel, Encoding, HeaderInfo};
pub use worker::ChannelSummary;

use image::header::read_header;
use splitter::{BlockSplitter, ChannelSender};
use threadpool::ThreadPool;
use worker::ChannelWorker;

mod cli;
mod error;
pub mod histogram;
pub mod image;
mod logger;
pub mod splitter;
mod worker;

pub type Result<T> = std::result::Result<T, error::Error>;

const WORKER_THREAD_NAME: &str = "channel-worker";

pub struct Arguments {
    input_file: PathBuf,
    block_size: usize,
    output_directory: Option<PathBuf>,
}

/// Names of the files written per channel: `<c>_<stem>.txt` and
/// `<c>_<stem>.ppm`, where `<c>` is the initial of the channel name.
pub struct OutputNaming {
    directory: PathBuf,
    stem: String,
}

impl OutputNaming {
    pub fn new(directory: &Path, stem: &str) -> Self {
        Self {
            directory: directory.to_path_buf(),
            stem: stem.to_owned(),
        }
    }

    /// Derives the names from the input file, writing next to it unless an
    /// output directory is given.
    pub fn from_input(input_file: &Path, output_directory: Option<&Path>) -> Self {
        let stem = input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let directory = output_directory
            .or_else(|| input_file.parent())
            .filter(|directory| !directory.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::new(directory, &stem)
    }

    pub fn histogram_path(&self, channel: ColorChannel) -> PathBuf {
        self.file_path(channel, "txt")
    }

    pub fn image_path(&self, channel: ColorChannel) -> PathBuf {
        self.file_path(channel, "ppm")
    }

    fn file_path(&self, channel: ColorChannel, extension: &str) -> PathBuf {
        self.directory
            .join(format!("{}_{}.{}", channel.initial(), self.stem, extension))
    }
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e))
}

pub(crate) fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

type ChannelReceiver = Receiver<Vec<ChannelValue>>;

fn create_channel_streams() -> ([ChannelSender; 3], [ChannelReceiver; 3]) {
    let (red_sender, red_receiver) = mpsc::channel();
    let (green_sender, green_receiver) = mpsc::channel();
    let (blue_sender, blue_receiver) = mpsc::channel();
    (
        [red_sender, green_sender, blue_sender],
        [red_receiver, green_receiver, blue_receiver],
    )
}

fn spawn_channel_workers(
    threadpool: &ThreadPool,
    header: HeaderInfo,
    naming: &OutputNaming,
    receivers: [ChannelReceiver; 3],
) -> Receiver<(ColorChannel, Result<ChannelSummary>)> {
    let (result_sender, result_receiver) = mpsc::channel();
    for (channel, receiver) in ColorChannel::ALL.into_iter().zip(receivers) {
        let worker = ChannelWorker::new(channel, header, naming);
        let result_sender = result_sender.clone();
        threadpool.execute(move || {
            let result = worker.run(receiver);
            let _ = result_sender.send((channel, result));
        });
    }
    result_receiver
}

fn collect_worker_results(
    results: Receiver<(ColorChannel, Result<ChannelSummary>)>,
) -> Result<Vec<ChannelSummary>> {
    let mut summaries: [Option<Result<ChannelSummary>>; 3] = Default::default();
    for (channel, result) in results {
        summaries[channel.index()] = Some(result);
    }
    let mut collected = Vec::with_capacity(summaries.len());
    let mut first_error = None;
    for (channel, summary) in ColorChannel::ALL.into_iter().zip(summaries) {
        match summary.unwrap_or_else(|| Err(Error::ChannelWorkerFailed(channel))) {
            Ok(summary) => collected.push(summary),
            Err(e) => {
                log::warn!("Worker of {} channel failed: {}", channel, e);
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(collected),
    }
}

/// Splits the PPM image named in `arguments` into its three color channels.
///
/// The header is read and validated before any worker is started, so a
/// broken header leaves no output files behind. The payload is then streamed
/// in blocks of `block_size` bytes to one worker per channel. Every worker
/// writes a histogram report and a reconstructed single channel image.
pub fn split_ppm_channels(arguments: &Arguments) -> Result<Vec<ChannelSummary>> {
    let input_file = open_input_file(&arguments.input_file)?;
    let mut reader = BufReader::new(input_file);
    let header = read_header(&mut reader)?;
    log::info!(
        "Read {} header: {}x{}, max value {}",
        header.encoding.tag(),
        header.width,
        header.height,
        header.max_value
    );

    let naming = OutputNaming::from_input(
        &arguments.input_file,
        arguments.output_directory.as_deref(),
    );
    let (senders, receivers) = create_channel_streams();
    let splitter = BlockSplitter::new(&header, reader, arguments.block_size, senders)?;

    let threadpool =
        ThreadPool::with_name(WORKER_THREAD_NAME.to_owned(), ColorChannel::ALL.len());
    let results = spawn_channel_workers(&threadpool, header, &naming, receivers);
    let split_result = splitter.run();
    threadpool.join();
    let statistics = split_result?;
    log::info!(
        "Dispatched {} values in {} blocks of {} bytes",
        statistics.values,
        statistics.blocks,
        arguments.block_size
    );

    let summaries = collect_worker_results(results)?;
    for summary in &summaries {
        log::info!(
            "{} channel: {} values, {} distinct",
            summary.channel,
            summary.value_count,
            summary.distinct_values
        );
    }
    Ok(summaries)
}
