use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub author: String,
    /// UTC, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    pub message: String,
}

impl From<(ObjectId, Commit)> for LogEntry {
    fn from((oid, commit): (ObjectId, Commit)) -> Self {
        LogEntry {
            oid,
            author: commit.author().identity().to_string(),
            timestamp: commit.author().readable_timestamp(),
            message: commit.message().to_string(),
        }
    }
}
