// 电影浏览后端库
//
// 本库提供电影浏览页面的核心功能，包括：
// - 外部电影 API（OMDb）集成与搜索缓存
// - 并发抓取编排与共享电影列表
// - 筛选与分页
// - API 路由与服务端渲染页面

pub mod api;
pub mod config;
pub mod external;
pub mod models;
pub mod services;
pub mod store;
pub mod web;
