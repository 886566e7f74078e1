//! Serial executor standing in for the UI thread.
//!
//! Background tasks hand finished work to the queue through a
//! [`MainQueueHandle`]; whoever owns the [`MainQueue`] runs the jobs one at a
//! time, so delegate callbacks never overlap.

use tokio::sync::mpsc;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct MainQueue {
    rx: mpsc::UnboundedReceiver<Job>,
}

#[derive(Clone)]
pub struct MainQueueHandle {
    tx: mpsc::UnboundedSender<Job>,
}

impl MainQueue {
    pub fn new() -> (Self, MainQueueHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, MainQueueHandle { tx })
    }

    /// 依序執行工作，直到所有 handle 都被釋放
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            job();
        }
        tracing::debug!("Main queue closed");
    }

    /// 執行目前已排入的工作，回傳執行數量
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            count += 1;
        }
        count
    }
}

impl MainQueueHandle {
    /// 排入一個工作；主佇列已關閉時直接丟棄
    pub fn dispatch<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            tracing::debug!("Main queue is gone, dropping job");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_run_pending_keeps_order() {
        let (mut queue, handle) = MainQueue::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let seen = seen.clone();
            handle.dispatch(move || seen.lock().unwrap().push(i));
        }

        assert_eq!(queue.run_pending(), 5);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(queue.run_pending(), 0);
    }

    #[tokio::test]
    async fn test_jobs_never_overlap() {
        let (queue, handle) = MainQueue::new();
        let running = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut producers = Vec::new();
        for _ in 0..8 {
            let handle = handle.clone();
            let running = running.clone();
            let max_seen = max_seen.clone();
            producers.push(tokio::spawn(async move {
                for _ in 0..25 {
                    let running = running.clone();
                    let max_seen = max_seen.clone();
                    handle.dispatch(move || {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        running.fetch_sub(1, Ordering::SeqCst);
                    });
                }
            }));
        }
        drop(handle);

        let consumer = tokio::spawn(queue.run());
        for producer in producers {
            producer.await.unwrap();
        }
        consumer.await.unwrap();

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_after_close_is_dropped() {
        let (queue, handle) = MainQueue::new();
        drop(queue);
        handle.dispatch(|| panic!("must not run"));
    }
}
