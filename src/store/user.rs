//! 以用户名为键的用户记录存储。

use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{QrLoginError, Result};

/// 一条用户记录。
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// 用户的唯一 ID。
    pub id: String,
    /// 用户名，全局唯一。
    pub username: String,
    /// 登录口令。序列化时跳过，避免泄露到接口响应里。
    #[serde(skip_serializing)]
    pub password: String,
    /// 头像 URL。
    pub avatar: String,
    /// 注册时间（毫秒时间戳）。
    pub created_at: i64,
}

/// 进程内的用户存储。
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, User>,
    id_by_name: DashMap<String, String>,
}

impl UserStore {
    /// 创建一个空的用户存储。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个新用户。
    ///
    /// 头像使用按用户名生成的占位图，和原始前端保持一致。
    ///
    /// # 错误
    /// 用户名已被占用时返回 [`QrLoginError::UsernameTaken`]。
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        match self.id_by_name.entry(username.to_string()) {
            Entry::Occupied(_) => Err(QrLoginError::UsernameTaken(username.to_string())),
            Entry::Vacant(entry) => {
                let user = User {
                    id: Uuid::new_v4().to_string(),
                    username: username.to_string(),
                    password: password.to_string(),
                    avatar: format!(
                        "https://ui-avatars.com/api/?name={}&background=random",
                        urlencoding::encode(username)
                    ),
                    created_at: Utc::now().timestamp_millis(),
                };
                entry.insert(user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                Ok(user)
            }
        }
    }

    /// 用用户名和口令查找用户，二者都匹配时返回记录。
    #[must_use]
    pub fn login(&self, username: &str, password: &str) -> Option<User> {
        self.find_by_username(username)
            .filter(|user| user.password == password)
    }

    /// 按用户名查找用户。
    #[must_use]
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let id = self.id_by_name.get(username)?;
        self.users.get(id.value()).map(|u| u.value().clone())
    }

    /// 按 ID 查找用户。
    #[must_use]
    pub fn find_by_id(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.value().clone())
    }

    /// 更新用户资料，传 `None` 的字段保持不变。
    ///
    /// # 错误
    /// * 用户不存在时返回 [`QrLoginError::StoreNotFound`]。
    /// * 新用户名已被其他用户占用时返回 [`QrLoginError::UsernameTaken`]。
    pub fn update_profile(
        &self,
        user_id: &str,
        username: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<User> {
        if let Some(new_name) = username
            && let Some(existing) = self.id_by_name.get(new_name)
            && existing.value() != user_id
        {
            return Err(QrLoginError::UsernameTaken(new_name.to_string()));
        }

        let mut user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| QrLoginError::StoreNotFound(format!("用户 {user_id}")))?;

        if let Some(new_name) = username {
            self.id_by_name.remove(&user.username);
            self.id_by_name
                .insert(new_name.to_string(), user_id.to_string());
            user.username = new_name.to_string();
        }
        if let Some(new_avatar) = avatar {
            user.avatar = new_avatar.to_string();
        }
        Ok(user.value().clone())
    }
}
