use std::{
    fs::File,
    io::{
        BufReader,
        Cursor,
    },
    sync::mpsc,
    thread,
};

use rodio::{
    Decoder,
    OutputStream,
    OutputStreamHandle,
    Sink,
};

use crate::core::{
    errors::TangochoError,
    fetch,
};

enum PlayerCommand {
    Play(String),
}

/// Plays lesson sound clips on a dedicated worker thread. Playback problems
/// are logged and swallowed; they never surface in the UI or block it.
pub struct AudioPlayer {
    sender: mpsc::Sender<PlayerCommand>,
}

impl AudioPlayer {
    /// Spawns the playback worker. The output device is opened lazily on the
    /// first clip so a machine without one still runs the rest of the app.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || worker_loop(receiver));

        Self { sender }
    }

    /// Queues `location` (an http(s) URL or a local file path) for playback.
    pub fn play(&self, location: String) {
        if self.sender.send(PlayerCommand::Play(location)).is_err() {
            eprintln!("[Audio] Playback worker is gone; ignoring request");
        }
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn worker_loop(receiver: mpsc::Receiver<PlayerCommand>) {
    // OutputStream is not Send, so it lives on this thread for the whole
    // app lifetime. Dropping it would cut off every playing sink.
    let mut output: Option<(OutputStream, OutputStreamHandle)> = None;

    while let Ok(command) = receiver.recv() {
        match command {
            PlayerCommand::Play(location) => {
                if output.is_none() {
                    match OutputStream::try_default() {
                        Ok(pair) => output = Some(pair),
                        Err(e) => {
                            eprintln!("[Audio] No output device available: {}", e);
                            continue;
                        }
                    }
                }

                let Some((_stream, handle)) = &output else {
                    continue;
                };

                if let Err(e) = play_clip(handle, &location) {
                    eprintln!("[Audio] Sound play error for {}: {}", location, e);
                }
            }
        }
    }
}

/// Starts one clip on its own sink and detaches it, so overlapping clicks
/// overlap in playback instead of cutting each other off.
fn play_clip(handle: &OutputStreamHandle, location: &str) -> Result<(), TangochoError> {
    let sink = Sink::try_new(handle)?;

    if fetch::is_remote(location) {
        let bytes = reqwest::blocking::get(location)?.error_for_status()?.bytes()?;
        sink.append(Decoder::new(Cursor::new(bytes.to_vec()))?);
    } else {
        let file = File::open(location)?;
        sink.append(Decoder::new(BufReader::new(file))?);
    }

    sink.detach();
    Ok(())
}
