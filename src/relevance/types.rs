use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// 常用关联类型
pub mod keys {
    pub const USER_RESOURCE: &str = "UserResource";
    pub const USER_ROLE: &str = "UserRole";
    pub const USER_ELEMENT: &str = "UserElement";
    pub const USER_MODULE: &str = "UserModule";
    pub const USER_ORG: &str = "UserOrg";
    pub const ROLE_RESOURCE: &str = "RoleResource";
    pub const ROLE_ELEMENT: &str = "RoleElement";
    pub const ROLE_MODULE: &str = "RoleModule";
    pub const ROLE_DATA_PROPERTY: &str = "RoleDataProperty";
    pub const ROLE_ORG: &str = "RoleOrg";
}

/// 分配关联请求
///
/// 比如给用户分配资源，那么 `first_id` 就是用户ID，`sec_ids` 就是资源ID列表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// 关联类型，如 [`keys::USER_RESOURCE`]
    #[serde(rename = "type")]
    pub key: String,
    pub first_id: String,
    #[serde(default)]
    pub sec_ids: Vec<String>,
}

/// 同一个 first_id 下的一组 second_id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGroup {
    pub first_id: String,
    pub second_ids: Vec<String>,
}

/// first_id -> [second_id] 的有序映射
///
/// 分组顺序为 first_id 第一次出现的顺序，组内顺序为插入顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    groups: Vec<IdGroup>,
    positions: HashMap<String, usize>,  // first_id -> groups 下标
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只有一个分组的映射
    pub fn single<S: AsRef<str>>(first_id: &str, second_ids: &[S]) -> Self {
        let mut map = Self::new();
        for second_id in second_ids {
            map.insert(first_id, second_id.as_ref());
        }
        map
    }

    /// 追加一对关联，按 first_id 归组
    pub fn insert(&mut self, first_id: &str, second_id: &str) {
        match self.positions.get(first_id) {
            Some(&pos) => self.groups[pos].second_ids.push(second_id.to_string()),
            None => {
                self.positions.insert(first_id.to_string(), self.groups.len());
                self.groups.push(IdGroup {
                    first_id: first_id.to_string(),
                    second_ids: vec![second_id.to_string()],
                });
            }
        }
    }

    pub fn groups(&self) -> &[IdGroup] {
        &self.groups
    }

    /// 按分组顺序展开为 (first_id, second_id)
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().flat_map(|g| {
            g.second_ids.iter().map(move |s| (g.first_id.as_str(), s.as_str()))
        })
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.second_ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: AsRef<str>, S: AsRef<str>> FromIterator<(F, S)> for IdMap {
    fn from_iter<T: IntoIterator<Item = (F, S)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (first_id, second_id) in iter {
            map.insert(first_id.as_ref(), second_id.as_ref());
        }
        map
    }
}

impl From<&AssignRequest> for IdMap {
    fn from(req: &AssignRequest) -> Self {
        Self::single(&req.first_id, &req.sec_ids)
    }
}
