mod flat;
mod record;

pub use flat::{COLUMNS, Cell, FlatRow, flatten};
pub use record::{Author, CommentRecord, LikeCount, ReplyLevel};
