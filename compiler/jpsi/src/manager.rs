//! The PSI manager: configuration, the modification stamp, augmentation
//! providers and the set of live files.

use std::sync::{Arc, Weak};

use jpsi_ir::{CancellationToken, ModificationTracker};
use jpsi_parse::JavaLazyParser;
use jpsi_stub::deserialize_stub_tree;
use jpsi_tree::LazyParser;
use parking_lot::RwLock;
use tracing::debug;

use crate::augment::{AugmentProvider, EnumMembers, RecordMembers};
use crate::class::PsiClass;
use crate::config::PsiConfig;
use crate::error::PsiResult;
use crate::file::JavaFile;

/// Owns everything shared by the files of one project.
///
/// Files hold an `Arc` to their manager; the manager only keeps weak
/// references to files, so dropping the last handle to a file drops it.
pub struct PsiManager {
    config: PsiConfig,
    tracker: ModificationTracker,
    cancellation: CancellationToken,
    parser: Arc<dyn LazyParser>,
    providers: RwLock<Vec<Arc<dyn AugmentProvider>>>,
    files: RwLock<Vec<Weak<JavaFile>>>,
}

impl PsiManager {
    /// A manager with the built-in enum and record augmentation.
    pub fn new(config: PsiConfig) -> Arc<Self> {
        let builtin: Vec<Arc<dyn AugmentProvider>> =
            vec![Arc::new(EnumMembers), Arc::new(RecordMembers)];
        Arc::new(PsiManager {
            config,
            tracker: ModificationTracker::new(),
            cancellation: CancellationToken::new(),
            parser: JavaLazyParser::shared(),
            providers: RwLock::new(builtin),
            files: RwLock::new(Vec::new()),
        })
    }

    #[inline]
    pub fn config(&self) -> &PsiConfig {
        &self.config
    }

    /// The stamp every PSI cache is validated against.
    #[inline]
    pub fn modification_tracker(&self) -> &ModificationTracker {
        &self.tracker
    }

    #[inline]
    pub fn modification_count(&self) -> u64 {
        self.tracker.modification_count()
    }

    /// Token polled by PSI tree walks.
    #[inline]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub(crate) fn lazy_parser(&self) -> Arc<dyn LazyParser> {
        Arc::clone(&self.parser)
    }

    /// Add a provider after the built-in ones.
    ///
    /// Bumps the stamp: augmented member lists computed before no longer
    /// reflect every provider.
    pub fn register_augment_provider(&self, provider: Arc<dyn AugmentProvider>) {
        self.providers.write().push(provider);
        let stamp = self.tracker.increment();
        debug!(stamp, "augment provider registered");
    }

    pub(crate) fn augment_providers(&self) -> Vec<Arc<dyn AugmentProvider>> {
        self.providers.read().clone()
    }

    /// Parse `text` into a new file and build its stub tree.
    pub fn add_file(self: &Arc<Self>, name: impl Into<String>, text: &str) -> Arc<JavaFile> {
        let file = JavaFile::parse(Arc::clone(self), name.into(), text);
        self.register(&file);
        file
    }

    /// Add a file whose stub tree comes from a previous
    /// [`JavaFile::serialized_stubs`] instead of being rebuilt.
    ///
    /// The stubs are trusted until the syntax tree is loaded; a mismatch
    /// surfaces then as [`PsiError::StubAstMismatch`](crate::PsiError).
    pub fn add_file_with_stubs(
        self: &Arc<Self>,
        name: impl Into<String>,
        text: &str,
        stub_bytes: &[u8],
    ) -> PsiResult<Arc<JavaFile>> {
        let stubs = deserialize_stub_tree(stub_bytes)?;
        let file = JavaFile::with_stubs(Arc::clone(self), name.into(), text, stubs);
        self.register(&file);
        Ok(file)
    }

    fn register(&self, file: &Arc<JavaFile>) {
        let mut files = self.files.write();
        files.retain(|f| f.strong_count() > 0);
        files.push(Arc::downgrade(file));
        drop(files);
        let stamp = self.tracker.increment();
        debug!(file = file.name(), stamp, "file registered");
    }

    /// Live files in registration order.
    pub fn files(&self) -> Vec<Arc<JavaFile>> {
        self.files.read().iter().filter_map(Weak::upgrade).collect()
    }

    /// Find a class by qualified name (`p.Outer.Inner`) in any live file.
    pub fn find_class(&self, qualified_name: &str) -> PsiResult<Option<PsiClass>> {
        for file in self.files() {
            if let Some(class) = file.find_class(qualified_name)? {
                return Ok(Some(class));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for PsiManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PsiManager")
            .field("config", &self.config)
            .field("stamp", &self.modification_count())
            .field("files", &self.files.read().len())
            .finish_non_exhaustive()
    }
}
