//! Resolve commands (resolve, tree)
//!
//! Both run a manifest through a categorizer backed by an in-memory host,
//! then report what the host ended up with.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::logging::Logging;
use super::output::Output;
use crate::categorizer::{Categorizer, LifecycleWarning, RecordingHost, RegisteredTask};
use crate::domain::CategoryGraph;
use crate::storage::TaskManifest;

/// Whether a registered task came from the manifest or from finalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum TaskKind {
    Task,
    Category,
}

impl TaskKind {
    fn label(&self) -> &'static str {
        match self {
            TaskKind::Task => "task",
            TaskKind::Category => "category",
        }
    }
}

#[derive(Debug, Serialize)]
struct ResolvedTask {
    name: String,
    kind: TaskKind,
    dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<String>,
}

/// Everything the host received, plus the graph over it
struct Resolution {
    tasks: Vec<ResolvedTask>,
    graph: CategoryGraph,
    warnings: Vec<LifecycleWarning>,
}

impl Resolution {
    fn get(&self, name: &str) -> Option<&ResolvedTask> {
        self.tasks.iter().find(|t| t.name == name)
    }
}

fn resolve(
    output: &Output,
    logging: &Logging,
    manifest_path: &Path,
    separator: Option<&str>,
) -> Result<Resolution> {
    let manifest = TaskManifest::load(manifest_path)?;
    let mut config = manifest.config(manifest_path)?;
    config.apply_overrides(separator, output.is_verbose());
    if config.debug {
        logging.enable_debug();
    }
    output.verbose_ctx(
        "resolve",
        &format!(
            "Registering {} tasks with separator '{}'",
            manifest.tasks.len(),
            config.category_separator
        ),
    );

    let mut host = RecordingHost::<String>::new();
    let mut categorizer = Categorizer::with_config(&mut host, &config)?;
    manifest
        .register_all(&mut categorizer)
        .context("Failed to register tasks")?;
    let category_handles: HashSet<usize> = categorizer.finalize().into_iter().collect();
    let warnings = categorizer.close();

    output.verbose_ctx(
        "resolve",
        &format!("Finalized {} category tasks", category_handles.len()),
    );

    let tasks: Vec<ResolvedTask> = host
        .into_tasks()
        .into_iter()
        .enumerate()
        .map(|(idx, task)| {
            let RegisteredTask {
                name,
                dependencies,
                body,
            } = task;
            let kind = if category_handles.contains(&idx) {
                TaskKind::Category
            } else {
                TaskKind::Task
            };
            ResolvedTask {
                name,
                kind,
                dependencies,
                run: body,
            }
        })
        .collect();

    let graph = CategoryGraph::from_registrations(
        tasks
            .iter()
            .map(|t| (t.name.as_str(), t.dependencies.as_slice())),
    )
    .context("Failed to build dependency graph")?;

    output.verbose_ctx(
        "resolve",
        &format!(
            "Dependency graph has {} tasks, {} external",
            graph.len(),
            graph.len() - tasks.len()
        ),
    );

    Ok(Resolution {
        tasks,
        graph,
        warnings,
    })
}

/// List every registered task, dependencies first
pub fn list(
    output: &Output,
    logging: &Logging,
    manifest_path: &Path,
    separator: Option<&str>,
) -> Result<()> {
    let resolution = resolve(output, logging, manifest_path, separator)?;
    let order = resolution.graph.topological_order()?;

    let (ordered, external): (Vec<_>, Vec<_>) = order
        .iter()
        .partition(|name| resolution.get(name).is_some());
    let ordered: Vec<&ResolvedTask> = ordered
        .into_iter()
        .filter_map(|name| resolution.get(name))
        .collect();

    if output.is_json() {
        output.data(&serde_json::json!({
            "tasks": ordered,
            "external": external,
            "warnings": resolution.warnings,
        }));
    } else if ordered.is_empty() {
        println!("No tasks in manifest.");
    } else {
        println!("Resolved tasks ({}):", ordered.len());
        println!("{:<30} {:<10} DEPENDS ON", "NAME", "KIND");
        println!("{}", "-".repeat(70));
        for task in ordered {
            println!(
                "{:<30} {:<10} {}",
                task.name,
                task.kind.label(),
                task.dependencies.join(", ")
            );
        }
        if !external.is_empty() {
            println!();
            let names: Vec<&str> = external.iter().map(|name| name.as_str()).collect();
            println!("External dependencies: {}", names.join(", "));
        }
    }

    Ok(())
}

/// Show resolved tasks as a tree rooted at tasks nothing depends on
pub fn tree(
    output: &Output,
    logging: &Logging,
    manifest_path: &Path,
    separator: Option<&str>,
) -> Result<()> {
    let resolution = resolve(output, logging, manifest_path, separator)?;
    // fail on cycles before walking
    resolution.graph.topological_order()?;

    let mut lines = Vec::new();
    let mut seen = HashSet::new();
    for root in resolution.graph.roots() {
        render(&resolution, &root, 0, &mut seen, &mut lines);
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "roots": resolution.graph.roots(),
            "tasks": resolution.tasks,
        }));
    } else if resolution.graph.is_empty() {
        println!("No tasks in manifest.");
    } else {
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}

fn render(
    resolution: &Resolution,
    name: &str,
    depth: usize,
    seen: &mut HashSet<String>,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    let task = match resolution.get(name) {
        Some(task) => task,
        None => {
            lines.push(format!("{}{} (external)", indent, name));
            return;
        }
    };

    let marker = match task.kind {
        TaskKind::Category => "/",
        TaskKind::Task => "",
    };

    if !seen.insert(name.to_string()) {
        lines.push(format!("{}{}{} (see above)", indent, name, marker));
        return;
    }

    lines.push(format!("{}{}{}", indent, name, marker));
    for dependency in &task.dependencies {
        render(resolution, dependency, depth + 1, seen, lines);
    }
}
