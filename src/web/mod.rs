// 服务端渲染的 HTML 页面

pub mod components;
pub mod layout;
pub mod pages;
