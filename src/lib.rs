//! 教育平台后端库
//! 学生、科目、测验与分班测试的 REST 服务，以及基于 Cookie 的会话认证

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
