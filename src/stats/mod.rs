pub mod types;

use std::path::Path;

use anyhow::{Context, Result};
use compact_str::CompactString;
use indexmap::IndexMap;

use self::types::{IndicesStatsFile, NodeInfo, NodesStatsFile, ShardCopy};

pub const NODES_STATS_FILE: &str = "nodes_stats.json";
pub const INDICES_STATS_FILE: &str = "indices_stats.json";

/// Everything the tree builders need from one diagnostics dump.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// node id → node facts, in file order
    pub nodes: IndexMap<String, NodeInfo>,
    /// All shard copies, in file order (index, shard number, copy)
    pub shard_copies: Vec<ShardCopy>,
}

impl Diagnostics {
    /// Parse both stats documents from their JSON text.
    pub fn from_json(nodes_json: &str, indices_json: &str) -> Result<Self> {
        let nodes_file: NodesStatsFile =
            serde_json::from_str(nodes_json).context("Malformed node stats")?;
        let indices_file: IndicesStatsFile =
            serde_json::from_str(indices_json).context("Malformed index stats")?;
        Ok(Self::from_files(nodes_file, indices_file))
    }

    fn from_files(nodes_file: NodesStatsFile, indices_file: IndicesStatsFile) -> Self {
        let nodes = nodes_file
            .nodes
            .into_iter()
            .map(|(id, stats)| {
                let disk_by_path = stats
                    .fs
                    .data
                    .into_iter()
                    .map(|d| (d.path, d.total_in_bytes))
                    .collect();
                let info = NodeInfo {
                    name: CompactString::new(&stats.name),
                    heap_max_in_bytes: stats.jvm.mem.heap_max_in_bytes,
                    disk_by_path,
                };
                (id, info)
            })
            .collect();

        let mut shard_copies = Vec::new();
        for (index, index_stats) in indices_file.indices {
            for (shard, copies) in index_stats.shards {
                for copy in copies {
                    shard_copies.push(ShardCopy {
                        index: CompactString::new(&index),
                        shard: CompactString::new(&shard),
                        node_id: CompactString::new(&copy.routing.node),
                        primary: copy.routing.primary,
                        store_bytes: copy.store.size_in_bytes,
                        translog_bytes: copy.translog.size_in_bytes,
                        segment_memory_bytes: copy.segments.memory_in_bytes,
                        data_path: copy.shard_path.data_path,
                    });
                }
            }
        }

        Diagnostics {
            nodes,
            shard_copies,
        }
    }

    pub fn primary_count(&self) -> usize {
        self.shard_copies.iter().filter(|c| c.primary).count()
    }
}

/// Load `nodes_stats.json` and `indices_stats.json` from an unpacked diagnostics dump.
pub fn load(dir: &Path) -> Result<Diagnostics> {
    let nodes_path = dir.join(NODES_STATS_FILE);
    let indices_path = dir.join(INDICES_STATS_FILE);

    let nodes_text = std::fs::read_to_string(&nodes_path)
        .with_context(|| format!("Failed to read {}", nodes_path.display()))?;
    let nodes_file: NodesStatsFile = serde_json::from_str(&nodes_text)
        .with_context(|| format!("Malformed node stats in {}", nodes_path.display()))?;

    let indices_text = std::fs::read_to_string(&indices_path)
        .with_context(|| format!("Failed to read {}", indices_path.display()))?;
    let indices_file: IndicesStatsFile = serde_json::from_str(&indices_text)
        .with_context(|| format!("Malformed index stats in {}", indices_path.display()))?;

    let diagnostics = Diagnostics::from_files(nodes_file, indices_file);
    let primaries = diagnostics.primary_count();
    tracing::info!(
        "Loaded diagnostics from {}: {} nodes, {} shard copies ({} primaries, {} replicas)",
        dir.display(),
        diagnostics.nodes.len(),
        diagnostics.shard_copies.len(),
        primaries,
        diagnostics.shard_copies.len() - primaries
    );

    Ok(diagnostics)
}
