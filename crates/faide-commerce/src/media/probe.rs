//! Concurrent, timeout-bounded image probing.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, AbortHandle, Aborted};
use serde::Serialize;
use tokio::task::JoinHandle;

/// How long a single probe may take before it counts as "not found".
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(900);

/// Numbered variants tried after the base image.
pub const DEFAULT_MAX_VARIANTS: usize = 3;

/// Answers whether an image exists.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Whether `path` refers to an existing image. Failures count as `false`.
    async fn exists(&self, path: &str) -> bool;
}

/// Probes images on disk, resolving site-absolute paths against a root.
#[derive(Debug, Clone)]
pub struct FsImageProbe {
    root: PathBuf,
}

impl FsImageProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `/images/tshirt.png` -> `<root>/images/tshirt.png`
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ImageProbe for FsImageProbe {
    async fn exists(&self, path: &str) -> bool {
        match tokio::fs::metadata(self.resolve(path)).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }
}

/// Probe tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    pub timeout: Duration,
    pub max_variants: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            max_variants: DEFAULT_MAX_VARIANTS,
        }
    }
}

/// The base image followed by up to `max_variants` numbered variants.
///
/// `/images/tshirt.png` with 2 variants gives `/images/tshirt.png`,
/// `/images/tshirt1.png`, `/images/tshirt2.png`.
pub fn variant_candidates(base: &str, max_variants: usize) -> Vec<String> {
    let file_start = base.rfind('/').map_or(0, |i| i + 1);
    let (stem, ext) = match base[file_start..].rfind('.') {
        // A leading dot is part of the name, not an extension.
        Some(dot) if dot > 0 => base.split_at(file_start + dot),
        _ => (base, ""),
    };

    std::iter::once(base.to_string())
        .chain((1..=max_variants).map(|n| format!("{stem}{n}{ext}")))
        .collect()
}

/// Probe every candidate concurrently.
///
/// Results are in candidate order. A probe that outlives `timeout` counts as
/// not found.
pub async fn probe_all<P>(probe: &P, candidates: &[String], timeout: Duration) -> Vec<bool>
where
    P: ImageProbe + ?Sized,
{
    let probes = candidates.iter().map(|candidate| async move {
        match tokio::time::timeout(timeout, probe.exists(candidate)).await {
            Ok(found) => found,
            Err(_) => {
                tracing::debug!(%candidate, ?timeout, "image probe timed out");
                false
            }
        }
    });
    future::join_all(probes).await
}

/// Images discovered for one base image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gallery {
    pub images: Vec<String>,
    /// Nothing was found and `images` holds only the base path.
    pub fallback_used: bool,
}

/// Discover the gallery for `base`.
///
/// Found images keep candidate order. When none is found the gallery is just
/// `base`, so there is always something to render.
pub async fn resolve_gallery<P>(probe: &P, base: &str, options: ProbeOptions) -> Gallery
where
    P: ImageProbe + ?Sized,
{
    let candidates = variant_candidates(base, options.max_variants);
    let found = probe_all(probe, &candidates, options.timeout).await;

    let images: Vec<String> = candidates
        .into_iter()
        .zip(found)
        .filter_map(|(candidate, ok)| ok.then_some(candidate))
        .collect();

    tracing::debug!(%base, found = images.len(), "resolved gallery");

    if images.is_empty() {
        Gallery {
            images: vec![base.to_string()],
            fallback_used: true,
        }
    } else {
        Gallery {
            images,
            fallback_used: false,
        }
    }
}

/// A gallery lookup running in the background.
///
/// Cancel it when the view it was started for goes away; a cancelled lookup
/// joins to `None` and its result is never applied.
pub struct ProbeHandle {
    abort: AbortHandle,
    task: JoinHandle<Result<Gallery, Aborted>>,
}

impl ProbeHandle {
    /// Stop the lookup. Safe to call more than once.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// A handle that cancels this lookup from elsewhere, e.g. a signal handler.
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }

    /// Wait for the gallery. `None` if the lookup was cancelled.
    pub async fn join(self) -> Option<Gallery> {
        match self.task.await {
            Ok(Ok(gallery)) => Some(gallery),
            Ok(Err(Aborted)) => {
                tracing::debug!("image probe cancelled");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "image probe task failed");
                None
            }
        }
    }
}

/// Start [`resolve_gallery`] on the tokio runtime.
pub fn spawn_probe<P>(probe: Arc<P>, base: impl Into<String>, options: ProbeOptions) -> ProbeHandle
where
    P: ImageProbe + ?Sized + 'static,
{
    let base = base.into();
    let (lookup, abort) =
        future::abortable(async move { resolve_gallery(probe.as_ref(), &base, options).await });

    ProbeHandle {
        abort,
        task: tokio::spawn(lookup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct KnownImages(HashSet<String>);

    impl KnownImages {
        fn new(paths: &[&str]) -> Self {
            Self(paths.iter().map(|p| p.to_string()).collect())
        }
    }

    #[async_trait]
    impl ImageProbe for KnownImages {
        async fn exists(&self, path: &str) -> bool {
            self.0.contains(path)
        }
    }

    /// Finds everything, but only after `delay`.
    struct SlowProbe {
        delay: Duration,
    }

    #[async_trait]
    impl ImageProbe for SlowProbe {
        async fn exists(&self, _path: &str) -> bool {
            tokio::time::sleep(self.delay).await;
            true
        }
    }

    fn fast() -> ProbeOptions {
        ProbeOptions {
            timeout: Duration::from_millis(50),
            max_variants: 3,
        }
    }

    #[test]
    fn test_variant_candidates() {
        assert_eq!(
            variant_candidates("/images/tshirt.png", 2),
            vec!["/images/tshirt.png", "/images/tshirt1.png", "/images/tshirt2.png"]
        );
        assert_eq!(variant_candidates("hoodie", 1), vec!["hoodie", "hoodie1"]);
        assert_eq!(
            variant_candidates("/img.v2/tank.webp", 1),
            vec!["/img.v2/tank.webp", "/img.v2/tank1.webp"]
        );
        assert_eq!(variant_candidates("/images/.hidden", 1), vec!["/images/.hidden", "/images/.hidden1"]);
        assert_eq!(variant_candidates("a.png", 0), vec!["a.png"]);
    }

    #[tokio::test]
    async fn test_gallery_keeps_found_in_order() {
        let probe = KnownImages::new(&["/images/tshirt2.png", "/images/tshirt.png"]);
        let gallery = resolve_gallery(&probe, "/images/tshirt.png", fast()).await;

        assert_eq!(gallery.images, vec!["/images/tshirt.png", "/images/tshirt2.png"]);
        assert!(!gallery.fallback_used);
    }

    #[tokio::test]
    async fn test_gallery_falls_back_to_base() {
        let probe = KnownImages::new(&[]);
        let gallery = resolve_gallery(&probe, "/images/tank.png", fast()).await;

        assert_eq!(gallery.images, vec!["/images/tank.png"]);
        assert!(gallery.fallback_used);
    }

    #[tokio::test]
    async fn test_slow_probe_counts_as_missing() {
        let probe = SlowProbe {
            delay: Duration::from_secs(30),
        };
        let candidates = variant_candidates("/images/tee.png", 2);
        let found = probe_all(&probe, &candidates, Duration::from_millis(20)).await;
        assert_eq!(found, vec![false, false, false]);
    }

    #[tokio::test]
    async fn test_spawned_probe_completes() {
        let probe = Arc::new(KnownImages::new(&["/images/hoodie.png", "/images/hoodie1.png"]));
        let handle = spawn_probe(probe, "/images/hoodie.png", fast());

        let gallery = handle.join().await.unwrap();
        assert_eq!(gallery.images.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_probe_yields_none() {
        let probe = Arc::new(SlowProbe {
            delay: Duration::from_secs(30),
        });
        let handle = spawn_probe(
            probe,
            "/images/tee.png",
            ProbeOptions {
                timeout: Duration::from_secs(60),
                max_variants: 3,
            },
        );

        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(handle.join().await, None);
    }

    #[tokio::test]
    async fn test_fs_probe() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/tee.png"), b"png").unwrap();
        std::fs::write(dir.path().join("images/tee2.png"), b"png").unwrap();
        std::fs::create_dir_all(dir.path().join("images/tee1.png")).unwrap();

        let probe = FsImageProbe::new(dir.path());
        let gallery = resolve_gallery(&probe, "/images/tee.png", fast()).await;

        // directories are not images
        assert_eq!(gallery.images, vec!["/images/tee.png", "/images/tee2.png"]);
    }
}
