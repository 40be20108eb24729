use crate::file::{self, FileReadError};
use crate::messages::ResponseMessage;
use crate::state::{Side, Ticket};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

pub enum LoaderMessage {
    /// Read a file from disk
    Open {
        side: Side,
        ticket: Ticket,
        path: PathBuf,
    },
    /// Decode bytes that arrived without a usable path (e.g. a dropped file)
    Decode {
        side: Side,
        ticket: Ticket,
        name: String,
        bytes: Option<Arc<[u8]>>,
    },
}

pub struct Loader {
    receiver: Receiver<LoaderMessage>,
    response_sender: Sender<ResponseMessage>,
    repaint: Option<egui::Context>,
}

impl Loader {
    pub fn new(
        receiver: Receiver<LoaderMessage>,
        response_sender: Sender<ResponseMessage>,
        repaint: Option<egui::Context>,
    ) -> Self {
        Self {
            receiver,
            response_sender,
            repaint,
        }
    }

    pub fn run(&self) {
        while let Ok(message) = self.receiver.recv() {
            let response = match message {
                LoaderMessage::Open { side, ticket, path } => {
                    tracing::info!("Loading file {} from {:?}", side, path);
                    ResponseMessage::FileLoaded {
                        side,
                        ticket,
                        result: file::read_file(&path),
                    }
                }
                LoaderMessage::Decode {
                    side,
                    ticket,
                    name,
                    bytes,
                } => {
                    let result = match bytes {
                        Some(bytes) => file::decode(name, bytes.to_vec()),
                        None => Err(FileReadError::Missing { name }),
                    };
                    ResponseMessage::FileLoaded {
                        side,
                        ticket,
                        result,
                    }
                }
            };

            if let Err(e) = self.response_sender.send(response) {
                tracing::error!("Failed to send loaded file: {}", e);
                break;
            }
            if let Some(ctx) = &self.repaint {
                ctx.request_repaint();
            }
        }
    }
}

/// Start the loader thread. When `repaint` is given the UI is woken after every reply.
pub fn spawn_loader(repaint: Option<egui::Context>) -> (Sender<LoaderMessage>, Receiver<ResponseMessage>) {
    let (sender, receiver) = std::sync::mpsc::channel();
    let (response_sender, response_receiver) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let loader = Loader::new(receiver, response_sender, repaint);
        loader.run();
    });
    (sender, response_receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use uuid::Uuid;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn setup_test_dir() -> PathBuf {
        let test_dir = std::env::temp_dir().join(format!("test_loader_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        test_dir
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    #[test]
    fn test_open_file() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("left.xml");
        fs::write(&path, "<a/>\n").unwrap();

        let (sender, receiver) = spawn_loader(None);
        sender
            .send(LoaderMessage::Open {
                side: Side::A,
                ticket: 7,
                path,
            })
            .unwrap();

        match receiver.recv_timeout(TIMEOUT).unwrap() {
            ResponseMessage::FileLoaded {
                side,
                ticket,
                result,
            } => {
                assert_eq!(side, Side::A);
                assert_eq!(ticket, 7);
                let input = result.unwrap();
                assert_eq!(input.name, "left.xml");
                assert_eq!(input.content, "<a/>\n");
            }
        }

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_open_missing_file_reports_error() {
        let test_dir = setup_test_dir();

        let (sender, receiver) = spawn_loader(None);
        sender
            .send(LoaderMessage::Open {
                side: Side::B,
                ticket: 1,
                path: test_dir.join("nope.xml"),
            })
            .unwrap();

        match receiver.recv_timeout(TIMEOUT).unwrap() {
            ResponseMessage::FileLoaded { side, result, .. } => {
                assert_eq!(side, Side::B);
                assert!(matches!(result, Err(FileReadError::Io { .. })));
            }
        }

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_decode_dropped_bytes() {
        let (sender, receiver) = spawn_loader(None);
        let bytes: Arc<[u8]> = Arc::from(&b"\xef\xbb\xbf<root/>"[..]);
        sender
            .send(LoaderMessage::Decode {
                side: Side::A,
                ticket: 3,
                name: "dropped.xml".to_string(),
                bytes: Some(bytes),
            })
            .unwrap();
        sender
            .send(LoaderMessage::Decode {
                side: Side::B,
                ticket: 4,
                name: "empty".to_string(),
                bytes: None,
            })
            .unwrap();

        match receiver.recv_timeout(TIMEOUT).unwrap() {
            ResponseMessage::FileLoaded { result, .. } => {
                assert_eq!(result.unwrap().content, "<root/>");
            }
        }
        match receiver.recv_timeout(TIMEOUT).unwrap() {
            ResponseMessage::FileLoaded { result, .. } => {
                assert!(matches!(result, Err(FileReadError::Missing { .. })));
            }
        }
    }
}
