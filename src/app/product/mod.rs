//! 产品管理：路由处理器、业务服务和数据访问

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
