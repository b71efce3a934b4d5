//! 点击“出发”后的流程
//!
//! - 加入：小组码必须是 6 位数字，服务端确认存在后进入骑行页
//! - 创建：生成小组 ID 并上传名称
//!
//! 两条路径最后都会上传身份（骑手/观众）。

use std::sync::Arc;

use super::{GroupDirectory, GroupError, GroupForm, GroupSelection, RiderType, GROUP_CODE_LEN};
use crate::completion::Completion;

/// 进入骑行页所需的会话信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideSession {
    pub group_id: String,
    pub group_name: Option<String>,
    pub rider_type: RiderType,
}

pub struct GroupFlow<D: GroupDirectory> {
    directory: Arc<D>,
}

impl<D: GroupDirectory> GroupFlow<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    pub async fn go(&self, form: &GroupForm) -> Result<RideSession, GroupError> {
        let session = match form.selection() {
            None => return Err(GroupError::NoSelection),
            Some(GroupSelection::Join) => self.join(form).await?,
            Some(GroupSelection::Create) => self.create(form).await?,
        };

        self.directory
            .upload_ride_type(session.rider_type, &session.group_id);
        log::info!(
            "🚴 进入骑行页 - 小组 {}（{:?}）",
            session.group_id,
            session.rider_type
        );

        Ok(session)
    }

    async fn join(&self, form: &GroupForm) -> Result<RideSession, GroupError> {
        let code = parse_group_code(form.code())?;

        let (done, pending) = Completion::channel();
        self.directory.join_group(code, true, done);
        let outcome = pending
            .wait()
            .await
            .ok_or_else(|| GroupError::ServiceUnavailable("加入小组".to_string()))?;

        if !outcome.completed {
            log::warn!("小组不存在 - {}", form.code());
            return Err(GroupError::GroupNotFound(form.code().to_string()));
        }

        Ok(RideSession {
            group_id: form.code().to_string(),
            group_name: outcome.group_name,
            rider_type: form.rider_type(),
        })
    }

    async fn create(&self, form: &GroupForm) -> Result<RideSession, GroupError> {
        if form.name().is_empty() {
            return Err(GroupError::EmptyName);
        }

        let (done, pending) = Completion::channel();
        self.directory.generate_group_number(done);
        let group_id = pending
            .wait()
            .await
            .ok_or_else(|| GroupError::ServiceUnavailable("生成小组 ID".to_string()))?;

        self.directory.upload_group_name(form.name(), &group_id);
        log::info!("🆕 已创建小组 - ID: {}", group_id);

        Ok(RideSession {
            group_id,
            group_name: Some(form.name().to_string()),
            rider_type: form.rider_type(),
        })
    }
}

/// 小组码必须是 6 位十进制数字。
fn parse_group_code(code: &str) -> Result<u32, GroupError> {
    if code.len() != GROUP_CODE_LEN || !code.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(GroupError::InvalidCode(code.to_string()));
    }
    code.parse::<u32>()
        .map_err(|_| GroupError::InvalidCode(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::JoinOutcome;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockDirectory {
        groups: HashMap<u32, String>,
        next_id: Option<String>,
        writes: Mutex<Vec<String>>,
    }

    impl MockDirectory {
        fn writes(&self) -> Vec<String> {
            self.writes.lock().expect("writes lock").clone()
        }
    }

    impl GroupDirectory for MockDirectory {
        fn join_group(&self, code: u32, _check_existing_ids: bool, done: Completion<JoinOutcome>) {
            let group_name = self.groups.get(&code).cloned();
            done.complete(JoinOutcome {
                completed: group_name.is_some(),
                group_name,
            });
        }

        fn generate_group_number(&self, done: Completion<String>) {
            if let Some(id) = self.next_id.clone() {
                std::thread::spawn(move || done.complete(id));
            }
        }

        fn upload_group_name(&self, name: &str, group_id: &str) {
            self.writes
                .lock()
                .expect("writes lock")
                .push(format!("name:{}:{}", group_id, name));
        }

        fn upload_ride_type(&self, rider_type: RiderType, group_id: &str) {
            self.writes
                .lock()
                .expect("writes lock")
                .push(format!("ride:{}:{:?}", group_id, rider_type));
        }
    }

    fn directory() -> Arc<MockDirectory> {
        let mut groups = HashMap::new();
        groups.insert(123456, "Sunday Loop".to_string());
        groups.insert(12345, "Leading Zero".to_string());
        Arc::new(MockDirectory {
            groups,
            next_id: Some("987654".to_string()),
            ..MockDirectory::default()
        })
    }

    #[tokio::test]
    async fn test_join_existing_group() {
        let dir = directory();
        let flow = GroupFlow::new(Arc::clone(&dir));
        let mut form = GroupForm::new();
        form.on_code_changed("123456");
        form.set_rider_type(RiderType::Spectator);

        let session = flow.go(&form).await.expect("join");

        assert_eq!(
            session,
            RideSession {
                group_id: "123456".into(),
                group_name: Some("Sunday Loop".into()),
                rider_type: RiderType::Spectator,
            }
        );
        assert_eq!(dir.writes(), vec!["ride:123456:Spectator".to_string()]);
    }

    #[tokio::test]
    async fn test_join_code_with_leading_zero() {
        let flow = GroupFlow::new(directory());
        let mut form = GroupForm::new();
        form.on_code_changed("012345");

        let session = flow.go(&form).await.expect("join");

        assert_eq!(session.group_id, "012345");
        assert_eq!(session.group_name.as_deref(), Some("Leading Zero"));
    }

    #[tokio::test]
    async fn test_join_unknown_group() {
        let dir = directory();
        let flow = GroupFlow::new(Arc::clone(&dir));
        let mut form = GroupForm::new();
        form.on_code_changed("111111");

        assert_eq!(
            flow.go(&form).await,
            Err(GroupError::GroupNotFound("111111".into()))
        );
        assert!(dir.writes().is_empty());
    }

    #[tokio::test]
    async fn test_join_rejects_non_numeric_code() {
        let flow = GroupFlow::new(directory());
        let mut form = GroupForm::new();
        form.on_code_changed("12a456");

        assert_eq!(
            flow.go(&form).await,
            Err(GroupError::InvalidCode("12a456".into()))
        );
    }

    #[tokio::test]
    async fn test_create_group() {
        let dir = directory();
        let flow = GroupFlow::new(Arc::clone(&dir));
        let mut form = GroupForm::new();
        form.select_create();
        form.on_name_changed("Hill Repeats");

        let session = flow.go(&form).await.expect("create");

        assert_eq!(session.group_id, "987654");
        assert_eq!(session.group_name.as_deref(), Some("Hill Repeats"));
        assert_eq!(
            dir.writes(),
            vec![
                "name:987654:Hill Repeats".to_string(),
                "ride:987654:Rider".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_create_without_id_is_service_unavailable() {
        let dir = Arc::new(MockDirectory::default());
        let flow = GroupFlow::new(dir);
        let mut form = GroupForm::new();
        form.select_create();
        form.on_name_changed("Hill Repeats");

        assert!(matches!(
            flow.go(&form).await,
            Err(GroupError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let flow = GroupFlow::new(directory());
        let mut form = GroupForm::new();
        form.select_create();

        assert_eq!(flow.go(&form).await, Err(GroupError::EmptyName));
    }

    #[tokio::test]
    async fn test_no_selection() {
        let flow = GroupFlow::new(directory());
        assert_eq!(flow.go(&GroupForm::default()).await, Err(GroupError::NoSelection));
    }
}
