use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use image::{DynamicImage, GenericImageView};
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture file {} doesn't exist", .0.display())]
    Missing(PathBuf),
    #[error("couldn't decode texture {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// A texture that finished decoding and can now be put on its object. The
/// pixels are already in memory, so nothing touches the disk again.
#[derive(Debug, Clone)]
pub struct LoadedTexture<K> {
    pub key: K,
    pub path: PathBuf,
    pub name: String,
    pub image: DynamicImage,
}

struct Outcome<K> {
    key: K,
    path: PathBuf,
    result: Result<DynamicImage, TextureError>,
}

/// Decodes textures off the render thread. Each request gets its own worker;
/// results come back over a channel and are picked up by `poll`, which the
/// frame loop calls once per frame. Failures are logged and leave the object
/// with its plain colour. Nothing is ever retried.
pub struct TextureLoader<K> {
    sender: Sender<Outcome<K>>,
    receiver: Receiver<Outcome<K>>,
    states: HashMap<K, LoadState>,
}

impl<K> Default for TextureLoader<K>
where
    K: Copy + Eq + Hash + Send + std::fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TextureLoader<K>
where
    K: Copy + Eq + Hash + Send + std::fmt::Debug + 'static,
{
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        TextureLoader {
            sender,
            receiver,
            states: HashMap::new(),
        }
    }

    pub fn request(&mut self, key: K, path: &Path) {
        self.states.insert(key, LoadState::Pending);

        let sender = self.sender.clone();
        let path = path.to_owned();
        thread::spawn(move || {
            let result = decode(&path);
            // The loader may be gone by the time we finish; that's fine.
            let _ = sender.send(Outcome { key, path, result });
        });
    }

    pub fn state(&self, key: K) -> Option<LoadState> {
        self.states.get(&key).copied()
    }

    pub fn is_settled(&self) -> bool {
        self.states.values().all(|s| *s != LoadState::Pending)
    }

    /// Collects every load that finished since the last call, and returns the
    /// ones that succeeded.
    pub fn poll(&mut self) -> Vec<LoadedTexture<K>> {
        let mut loaded = vec![];
        for outcome in self.receiver.try_iter() {
            match outcome.result {
                Ok(image) => {
                    debug!(
                        "Loaded texture {} ({}x{})",
                        outcome.path.display(),
                        image.width(),
                        image.height()
                    );
                    self.states.insert(outcome.key, LoadState::Loaded);
                    loaded.push(LoadedTexture {
                        key: outcome.key,
                        name: format!("{:?}", outcome.key),
                        path: outcome.path,
                        image,
                    });
                }
                Err(err) => {
                    warn!("Error loading texture for {:?}: {}", outcome.key, err);
                    self.states.insert(outcome.key, LoadState::Failed);
                }
            }
        }
        loaded
    }
}

fn decode(path: &Path) -> Result<DynamicImage, TextureError> {
    if !path.is_file() {
        return Err(TextureError::Missing(path.to_owned()));
    }
    image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_owned(),
        source,
    })
}
