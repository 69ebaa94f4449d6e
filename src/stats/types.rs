use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Deserialize;

/// Per-node facts needed by the tree builders.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    /// Human-readable node name (used as the tree label)
    pub name: CompactString,
    /// Configured maximum JVM heap
    pub heap_max_in_bytes: u64,
    /// Data path → total disk capacity of that path
    pub disk_by_path: IndexMap<String, u64>,
}

/// One copy (primary or replica) of one shard, flattened out of the index stats.
#[derive(Debug, Clone)]
pub struct ShardCopy {
    pub index: CompactString,
    /// Shard number as it appears in the stats (a string key)
    pub shard: CompactString,
    pub node_id: CompactString,
    pub primary: bool,
    pub store_bytes: u64,
    pub translog_bytes: u64,
    pub segment_memory_bytes: u64,
    /// Data path holding this copy on its node
    pub data_path: String,
}

impl ShardCopy {
    /// `[index][shard]` descriptor used as the shard's label.
    pub fn descriptor(&self) -> String {
        format!("[{}][{}]", self.index, self.shard)
    }
}

// Wire shapes of the two JSON files. Only the fields we read are declared.

#[derive(Debug, Deserialize)]
pub(crate) struct NodesStatsFile {
    pub nodes: IndexMap<String, NodeStats>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeStats {
    pub name: String,
    pub jvm: JvmStats,
    pub fs: FsStats,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JvmStats {
    pub mem: JvmMemStats,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JvmMemStats {
    pub heap_max_in_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FsStats {
    pub data: Vec<FsDataStats>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FsDataStats {
    pub path: String,
    pub total_in_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndicesStatsFile {
    pub indices: IndexMap<String, IndexStats>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndexStats {
    pub shards: IndexMap<String, Vec<ShardCopyStats>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShardCopyStats {
    pub routing: RoutingStats,
    pub store: SizeStats,
    pub translog: SizeStats,
    pub segments: SegmentStats,
    pub shard_path: ShardPathStats,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoutingStats {
    pub node: String,
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SizeStats {
    pub size_in_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SegmentStats {
    pub memory_in_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShardPathStats {
    pub data_path: String,
}
