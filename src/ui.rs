pub mod footer;
pub mod hosts_list;
pub mod status_bar;

pub use hosts_list::draw;
