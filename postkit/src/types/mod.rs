mod comment;
mod page;
mod post;
mod user;

pub use comment::Comment;
pub use page::FeedPage;
pub use post::{NewPost, Post, PostPatch, PostSearchResults, Reactions};
pub use user::{
    Address, Company, Coordinates, Geo, SearchAddress, SearchCompany, SearchUser, SearchUserList,
    User,
};
