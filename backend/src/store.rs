use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use shared::{NewTask, Task, TaskPatch};
use std::sync::Mutex;
use uuid::Uuid;

/// Everything the task store can fail with. Never retried here; the
/// handler layer decides the status code.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Task not found")]
    NotFound,
    #[error("task store unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),
    #[error("stored task is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence contract for the task collection. `list` returns tasks in
/// insertion order; `replace` merges the patch over the stored record.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Task, StoreError>;
    async fn insert(&self, draft: NewTask) -> Result<Task, StoreError>;
    async fn replace(&self, id: Uuid, patch: TaskPatch) -> Result<Task, StoreError>;
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Redis-backed store. Each task lives at `task:{id}` as a JSON document;
/// `tasks:order` is a list of ids preserving insertion order.
pub struct RedisTaskStore {
    client: Client,
}

const ORDER_KEY: &str = "tasks:order";

fn task_key(id: Uuid) -> String {
    format!("task:{}", id)
}

impl RedisTaskStore {
    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }

    async fn conn(&self) -> Result<redis::aio::Connection, StoreError> {
        Ok(self.client.get_async_connection().await?)
    }
}

#[async_trait]
impl TaskStore for RedisTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let mut conn = self.conn().await?;
        let ids: Vec<String> = conn.lrange(ORDER_KEY, 0, -1).await?;
        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            // A dangling index entry is skipped rather than failing the listing.
            let doc: Option<String> = conn.get(format!("task:{}", id)).await?;
            if let Some(doc) = doc {
                tasks.push(serde_json::from_str(&doc)?);
            }
        }
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> Result<Task, StoreError> {
        let mut conn = self.conn().await?;
        let doc: Option<String> = conn.get(task_key(id)).await?;
        match doc {
            Some(doc) => Ok(serde_json::from_str(&doc)?),
            None => Err(StoreError::NotFound),
        }
    }

    async fn insert(&self, draft: NewTask) -> Result<Task, StoreError> {
        let task = Task::create(draft);
        let doc = serde_json::to_string(&task)?;
        let mut conn = self.conn().await?;
        let _: () = conn.set(task_key(task.id), doc).await?;
        let _: () = conn.rpush(ORDER_KEY, task.id.to_string()).await?;
        Ok(task)
    }

    async fn replace(&self, id: Uuid, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut conn = self.conn().await?;
        let doc: Option<String> = conn.get(task_key(id)).await?;
        let mut task: Task = match doc {
            Some(doc) => serde_json::from_str(&doc)?,
            None => return Err(StoreError::NotFound),
        };
        task.apply(&patch);
        let _: () = conn.set(task_key(id), serde_json::to_string(&task)?).await?;
        Ok(task)
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        let deleted: usize = conn.del(task_key(id)).await?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        let _: () = conn.lrem(ORDER_KEY, 0, id.to_string()).await?;
        Ok(())
    }
}

/// In-memory store with the same contract, backing the test suite.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Task, StoreError> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, draft: NewTask) -> Result<Task, StoreError> {
        let task = Task::create(draft);
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn replace(&self, id: Uuid, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        task.apply(&patch);
        Ok(task.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, description: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryTaskStore::new();
        let a = store.insert(draft("a", "a")).await.unwrap();
        let b = store.insert(draft("b", "b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryTaskStore::new();
        store.insert(draft("first", "1")).await.unwrap();
        store.insert(draft("second", "2")).await.unwrap();
        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn replace_merges_patch_over_record() {
        let store = MemoryTaskStore::new();
        let task = store.insert(draft("keep me", "and me")).await.unwrap();
        let updated = store
            .replace(
                task.id,
                TaskPatch {
                    completed: Some(true),
                    ..TaskPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "keep me");
        assert_eq!(updated.description, "and me");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryTaskStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id).await, Err(StoreError::NotFound)));
        assert!(matches!(
            store.replace(id, TaskPatch::default()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.remove(id).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn remove_then_get_is_not_found() {
        let store = MemoryTaskStore::new();
        let task = store.insert(draft("gone", "soon")).await.unwrap();
        store.remove(task.id).await.unwrap();
        assert!(matches!(
            store.get(task.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(store.list().await.unwrap().is_empty());
    }
}
