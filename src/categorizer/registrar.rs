//! Task registration with category linking

use tracing::debug;

use super::host::TaskHost;
use super::lifecycle::LifecycleWarning;
use super::Categorizer;
use crate::domain::CategoryError;

impl<H: TaskHost> Categorizer<H> {
    /// Registers a task with the host, linking it into its categories
    ///
    /// For `a:b:c`, `a:b` becomes a member of `a` and `a:b:c` a member of
    /// `a:b`. If `name` is itself a pending category, its members are
    /// appended to `dependencies` and the category is dropped, so it will not
    /// be registered again by [`Categorizer::finalize`].
    ///
    /// Fails without side effects if one of the categories of `name` is
    /// already a registered task.
    pub fn register(
        &mut self,
        name: &str,
        dependencies: Vec<String>,
        body: Option<H::Body>,
    ) -> Result<H::Handle, CategoryError> {
        let ancestors = self.parser.ancestor_categories(name);
        self.check_links(name, &ancestors)?;

        if self.finalized {
            self.report(LifecycleWarning::RegisteredAfterFinalize {
                name: name.to_string(),
            });
        }

        let mut dependencies = dependencies;
        if let Some(members) = self.registry.take_pending_members(name) {
            if self.debug {
                debug!(task = name, ?members, "merging category members into task");
            }
            dependencies.extend(members);
        }

        self.link(name, &ancestors)?;
        self.registry.mark_registered(name);

        if self.debug {
            debug!(task = name, ?dependencies, "registering task");
        }
        Ok(self.host.register(name, dependencies, body))
    }

    /// Registers a task that has a body but no dependencies
    pub fn register_body(&mut self, name: &str, body: H::Body) -> Result<H::Handle, CategoryError> {
        self.register(name, Vec::new(), Some(body))
    }

    /// Runs the conflict checks `link` would hit, in the same order
    fn check_links(&self, name: &str, ancestors: &[String]) -> Result<(), CategoryError> {
        for pair in ancestors.windows(2) {
            self.registry.check_category(&pair[0], &pair[1])?;
        }
        if let Some(deepest) = ancestors.last() {
            self.registry.check_category(deepest, name)?;
        }
        Ok(())
    }

    fn link(&mut self, name: &str, ancestors: &[String]) -> Result<(), CategoryError> {
        for pair in ancestors.windows(2) {
            self.add_member(&pair[0], &pair[1])?;
        }
        if let Some(deepest) = ancestors.last() {
            self.add_member(deepest, name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::host::RecordingHost;
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn categorizer() -> Categorizer<RecordingHost<String>> {
        Categorizer::new(RecordingHost::new())
    }

    #[test]
    fn links_full_ancestor_chain() {
        let mut cat = categorizer();
        cat.register("a:b:c", vec![], None).unwrap();

        assert_eq!(cat.registry().members("a").unwrap(), ["a:b"]);
        assert_eq!(cat.registry().members("a:b").unwrap(), ["a:b:c"]);
        assert_eq!(cat.pending_categories(), names(&["a", "a:b"]));
        cat.close();
    }

    #[test]
    fn top_level_task_creates_no_category() {
        let mut cat = categorizer();
        cat.register("clean", vec![], None).unwrap();

        assert!(cat.pending_categories().is_empty());
        assert_eq!(cat.host().get("clean").unwrap().dependencies, Vec::<String>::new());
    }

    #[test]
    fn siblings_share_category() {
        let mut cat = categorizer();
        cat.register("a:b:c", vec![], None).unwrap();
        cat.register("a:b:d", vec![], None).unwrap();

        assert_eq!(cat.registry().members("a:b").unwrap(), ["a:b:c", "a:b:d"]);
        // a:b was linked into a only once
        assert_eq!(cat.registry().members("a").unwrap(), ["a:b"]);
        cat.close();
    }

    #[test]
    fn explicit_category_task_absorbs_members() {
        let mut cat = categorizer();
        cat.register("a:b:c", vec![], None).unwrap();
        cat.register("a:b:d", vec![], None).unwrap();
        cat.register("a", vec![], None).unwrap();

        assert_eq!(cat.host().get("a").unwrap().dependencies, names(&["a:b"]));
        assert!(!cat.registry().is_pending("a"));
        assert_eq!(cat.pending_categories(), names(&["a:b"]));
        cat.close();
    }

    #[test]
    fn caller_dependencies_come_first() {
        let mut cat = categorizer();
        cat.register("js:lint", vec![], None).unwrap();
        cat.register("js", names(&["clean"]), None).unwrap();

        assert_eq!(
            cat.host().get("js").unwrap().dependencies,
            names(&["clean", "js:lint"])
        );
    }

    #[test]
    fn category_of_registered_task_is_a_conflict() {
        let mut cat = categorizer();
        cat.register("a:b:c", vec![], None).unwrap();
        cat.register("a:b:d", vec![], None).unwrap();
        cat.register("a", vec![], None).unwrap();

        let result = cat.register("a:e:f", vec![], None);
        assert_eq!(
            result,
            Err(CategoryError::NamingConflict {
                category: "a".to_string(),
                member: "a:e".to_string(),
            })
        );
        cat.close();
    }

    #[test]
    fn direct_child_of_registered_task_is_a_conflict() {
        let mut cat = categorizer();
        cat.register("build", vec![], None).unwrap();

        let result = cat.register("build:js", vec![], None);
        assert_eq!(
            result,
            Err(CategoryError::NamingConflict {
                category: "build".to_string(),
                member: "build:js".to_string(),
            })
        );
    }

    #[test]
    fn failed_register_leaves_no_trace() {
        let mut cat = categorizer();
        cat.register("a:b:c", vec![], None).unwrap();
        cat.register("a:b", vec![], None).unwrap();
        let calls_before = cat.host().calls();

        // a:b is a task now
        assert!(cat.register("a:b:z", vec![], None).is_err());

        assert_eq!(cat.host().calls(), calls_before);
        assert!(!cat.registry().is_registered("a:b:z"));
        assert_eq!(cat.pending_categories(), names(&["a"]));
        cat.close();
    }

    #[test]
    fn reregistering_a_task_is_allowed() {
        let mut cat = categorizer();
        cat.register("a:b", vec![], Some("first".to_string())).unwrap();
        cat.register("a:b", vec![], Some("second".to_string())).unwrap();

        assert_eq!(cat.registry().members("a").unwrap(), ["a:b"]);
        assert_eq!(
            cat.host().get("a:b").unwrap().body.as_deref(),
            Some("second")
        );
        cat.close();
    }

    #[test]
    fn register_body_has_no_dependencies() {
        let mut cat = categorizer();
        cat.register_body("css:min", "cssnano".to_string()).unwrap();

        let task = cat.host().get("css:min").unwrap();
        assert!(task.dependencies.is_empty());
        assert_eq!(task.body.as_deref(), Some("cssnano"));
        cat.close();
    }

    #[test]
    fn register_returns_host_handle() {
        let mut cat = categorizer();
        assert_eq!(cat.register("x", vec![], None), Ok(0));
        assert_eq!(cat.register("y", vec![], None), Ok(1));
        assert_eq!(cat.register("x", vec![], None), Ok(0));
    }

    #[test]
    fn register_after_finalize_warns() {
        let mut cat = categorizer();
        cat.finalize();
        cat.register("late:task", vec![], None).unwrap();

        assert_eq!(
            cat.warnings(),
            [LifecycleWarning::RegisteredAfterFinalize {
                name: "late:task".to_string(),
            }]
        );
        assert!(cat.host().get("late:task").is_some());
        cat.close();
    }
}
