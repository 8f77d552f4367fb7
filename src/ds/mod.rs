pub mod frequency_buckets;
pub mod keyed_list;
pub mod slot_arena;

pub use frequency_buckets::FrequencyBuckets;
pub use keyed_list::KeyedList;
pub use slot_arena::{SlotArena, SlotId};
