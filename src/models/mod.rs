pub mod movie;
pub mod filter;
pub mod pagination;
pub mod view;
pub mod validation;

pub use movie::{Movie, MovieType};
pub use filter::MovieFilter;
pub use pagination::{PageControl, Pagination, DEFAULT_PAGE_SIZE};
pub use view::{BrowseParams, MainPageView};
pub use validation::{ValidationError, Validator};
