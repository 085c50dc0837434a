use std::{
    fmt, fs,
    path::{Path, PathBuf},
    thread,
};

use crossbeam::channel::{bounded, Receiver};
use log::{error, info};
use thiserror::Error;

use crate::{
    dataset::Dataset,
    model::{PathwayEdge, PathwayNode},
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    #[error("invalid {collection} data: {source}")]
    Parse {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("data loader stopped before reporting a result")]
    Disconnected,
}

/// Where the two dataset files live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Dir(PathBuf),
    Http(String),
}

impl DataSource {
    /// `http://` and `https://` prefixes select HTTP, anything else is a directory.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Http(source.trim_end_matches('/').to_string())
        } else {
            Self::Dir(PathBuf::from(source))
        }
    }

    fn fetch(&self, file: &str) -> Result<String, LoadError> {
        match self {
            Self::Dir(dir) => read_file(&dir.join(file)),
            Self::Http(base) => {
                let url = format!("{base}/{file}");
                ureq::get(&url)
                    .call()
                    .map_err(|e| LoadError::Http {
                        url: url.clone(),
                        message: e.to_string(),
                    })?
                    .into_string()
                    .map_err(|e| LoadError::Http {
                        url,
                        message: e.to_string(),
                    })
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir(dir) => write!(f, "{}", dir.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetches both collections concurrently and builds the dataset.
/// Fails if either fetch or parse fails.
pub fn load(source: &DataSource, nodes_file: &str, edges_file: &str) -> Result<Dataset, LoadError> {
    let (nodes, edges) = thread::scope(|s| {
        let nodes = s.spawn(|| source.fetch(nodes_file));
        let edges = s.spawn(|| source.fetch(edges_file));
        (nodes.join(), edges.join())
    });
    let nodes = nodes.map_err(|_| LoadError::Disconnected)??;
    let edges = edges.map_err(|_| LoadError::Disconnected)??;

    let nodes: Vec<PathwayNode> = serde_json::from_str(&nodes).map_err(|source| LoadError::Parse {
        collection: "nodes",
        source,
    })?;
    let edges: Vec<PathwayEdge> = serde_json::from_str(&edges).map_err(|source| LoadError::Parse {
        collection: "edges",
        source,
    })?;

    let dataset = Dataset::new(nodes, edges);
    info!(
        "Loaded {} nodes and {} edges",
        dataset.nodes().len(),
        dataset.edges().len()
    );
    Ok(dataset)
}

/// Runs [`load`] on a background thread. The result arrives on the returned
/// channel exactly once.
pub fn spawn_load(
    source: DataSource,
    nodes_file: String,
    edges_file: String,
) -> Receiver<Result<Dataset, LoadError>> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let res = load(&source, &nodes_file, &edges_file);
        if let Err(e) = &res {
            error!("failed to load pathway data from {source}: {e}");
        }
        tx.send(res).ok();
    });
    rx
}
