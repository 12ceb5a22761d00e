//! 登录核心之外的协作者：用户、收藏与歌单的持久化包装。
//!
//! 这些只是按键取值的简单 CRUD，不参与扫码登录流程本身。
//! 默认提供进程内的 `DashMap` 实现，方便单体部署和测试；
//! 换成真正的数据库时保持同样的方法签名即可。

pub mod favorite;
pub mod playlist;
pub mod user;

pub use favorite::FavoriteStore;
pub use playlist::{Playlist, PlaylistStore};
pub use user::{User, UserStore};
