mod types;

pub use types::{
    CategoryMember, CategoryMembersQuery, CategoryMembersResponse, Continuation, Page,
    WordPronPair,
};
