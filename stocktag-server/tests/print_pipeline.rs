//! 打印流水线集成测试
//!
//! 使用临时工作目录 + 假打印命令 (shell 脚本) 覆盖完整链路：
//! 提交 → 入队 → 渲染 → 打印命令 → 状态回写。

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use shared::models::{ItemCreate, LabelSize, PrintJobStatus};
use stocktag_label::LabelRenderer;
use stocktag_server::db::repository::{item, print_job};
use stocktag_server::db::DbService;
use stocktag_server::printing::{LabelPrintService, PrintExecutor, PrintServiceError, PrintWorker};

async fn open_pool(dir: &Path) -> SqlitePool {
    let db_path = dir.join("test.db");
    DbService::new(&db_path.to_string_lossy())
        .await
        .expect("database init")
        .pool
}

fn print_service(pool: &SqlitePool) -> (LabelPrintService, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(64);
    (LabelPrintService::new(pool.clone(), tx), rx)
}

/// 写一个可执行的假打印命令，调用时把参数写入 marker 文件
fn write_spool_script(dir: &Path, marker: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(format!("fake-lp-{exit_code}.sh"));
    let script = format!(
        "#!/bin/sh\necho \"$@\" > {}\necho spooled\necho 'paper jam' >&2\nexit {}\n",
        marker.display(),
        exit_code
    );
    std::fs::write(&path, script).expect("write fake spooler");
    let mut perms = std::fs::metadata(&path).expect("stat fake spooler").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod fake spooler");
    path
}

fn spawn_worker(
    pool: &SqlitePool,
    labels_dir: PathBuf,
    program: &Path,
    rx: mpsc::Receiver<String>,
) -> CancellationToken {
    let worker = PrintWorker::new(
        pool.clone(),
        LabelRenderer::new(150),
        PrintExecutor::new(program.to_string_lossy(), "TEST_PRINTER"),
        labels_dir,
        "http://localhost:3000".to_string(),
        2,
    );
    let token = CancellationToken::new();
    tokio::spawn(worker.run(rx, token.clone()));
    token
}

/// 轮询任务直到离开 queued 状态
async fn wait_for_settled(pool: &SqlitePool, job_id: &str) -> shared::models::PrintJob {
    for _ in 0..200 {
        let job = print_job::find_by_id(pool, job_id)
            .await
            .expect("job lookup")
            .expect("job exists");
        if job.status != PrintJobStatus::Queued {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("print job {job_id} never settled");
}

fn sample_item(title: &str) -> ItemCreate {
    ItemCreate {
        title: title.to_string(),
        description: "This is a test description for a label.".to_string(),
        tags: vec!["test".to_string()],
        location: Some("Shelf B3".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn concurrent_creates_never_share_short_ids() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;

    let mut handles = Vec::new();
    for i in 0..50 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            item::create(&pool, sample_item(&format!("Item {i}")))
                .await
                .expect("create item")
        }));
    }

    let mut short_ids = HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap();
        assert_eq!(created.short_id.len(), 7);
        assert!(created
            .short_id
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        assert!(
            short_ids.insert(created.short_id.clone()),
            "duplicate short id {}",
            created.short_id
        );
    }
    assert_eq!(short_ids.len(), 50);
}

#[tokio::test]
async fn print_job_completes_and_spools_expected_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;
    let (service, rx) = print_service(&pool);

    let marker = dir.path().join("spooled-args.txt");
    let spooler = write_spool_script(dir.path(), &marker, 0);
    let labels_dir = dir.path().join("labels");
    let _token = spawn_worker(&pool, labels_dir.clone(), &spooler, rx);

    let record = item::create(&pool, sample_item("Cordless Drill")).await.unwrap();
    let job = service
        .submit(&record.id, LabelSize::Mm50x30, 3)
        .await
        .expect("submit print job");

    let settled = wait_for_settled(&pool, &job.id).await;
    assert_eq!(settled.status, PrintJobStatus::Completed);
    assert_eq!(settled.exit_code, Some(0));
    assert_eq!(settled.stdout.as_deref(), Some("spooled\n"));

    // Rendered document exists at the deterministic path
    let pdf = labels_dir.join(format!("label_{}_50x30.pdf", record.id));
    assert!(pdf.exists());
    let bytes = std::fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // Spool command carried destination, copies, media size and fit flag
    let args = std::fs::read_to_string(&marker).unwrap();
    assert!(args.contains("-d TEST_PRINTER"));
    assert!(args.contains("-n 3"));
    assert!(args.contains("media=Custom.50x30mm"));
    assert!(args.contains("fit-to-page"));
}

#[tokio::test]
async fn failed_spool_command_keeps_full_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;
    let (service, rx) = print_service(&pool);

    let marker = dir.path().join("spooled-args.txt");
    let spooler = write_spool_script(dir.path(), &marker, 7);
    let _token = spawn_worker(&pool, dir.path().join("labels"), &spooler, rx);

    let record = item::create(&pool, sample_item("Broken Printer Case")).await.unwrap();
    let job = service
        .submit(&record.id, LabelSize::Mm40x30, 1)
        .await
        .unwrap();

    let settled = wait_for_settled(&pool, &job.id).await;
    assert_eq!(settled.status, PrintJobStatus::Failed);
    assert_eq!(settled.exit_code, Some(7));
    assert!(settled.stderr.as_deref().unwrap_or_default().contains("paper jam"));
    assert!(settled
        .command
        .as_deref()
        .unwrap_or_default()
        .contains("media=Custom.40x30mm"));
    assert!(settled.error.as_deref().unwrap_or_default().contains("exited"));
}

#[tokio::test]
async fn submit_for_unknown_item_creates_no_job() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;
    let (service, _rx) = print_service(&pool);

    let err = service
        .submit("no-such-item", LabelSize::Mm50x30, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, PrintServiceError::ItemNotFound(_)));

    let queued = print_job::find_queued_ids(&pool).await.unwrap();
    assert!(queued.is_empty());
}

#[tokio::test]
async fn job_for_deleted_item_fails_without_invoking_spooler() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;
    let (service, rx) = print_service(&pool);

    let record = item::create(&pool, sample_item("Soon Gone")).await.unwrap();
    let job = service
        .submit(&record.id, LabelSize::Mm50x30, 1)
        .await
        .unwrap();

    // The record vanishes while the job sits in the queue
    assert!(item::delete(&pool, &record.id).await.unwrap());

    let marker = dir.path().join("spooled-args.txt");
    let spooler = write_spool_script(dir.path(), &marker, 0);
    let _token = spawn_worker(&pool, dir.path().join("labels"), &spooler, rx);

    let settled = wait_for_settled(&pool, &job.id).await;
    assert_eq!(settled.status, PrintJobStatus::Failed);
    assert!(settled.error.as_deref().unwrap_or_default().contains("not found"));
    // The external print command was never started
    assert!(!marker.exists());
}

#[tokio::test]
async fn queued_jobs_are_recovered_on_restart() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;

    let record = item::create(&pool, sample_item("Left Behind")).await.unwrap();

    // A job row from a previous process: queued, but on no live channel
    let orphan = print_job::create(&pool, &record.id, LabelSize::Mm62x30, 1)
        .await
        .unwrap();

    let (service, rx) = print_service(&pool);
    let marker = dir.path().join("spooled-args.txt");
    let spooler = write_spool_script(dir.path(), &marker, 0);
    let _token = spawn_worker(&pool, dir.path().join("labels"), &spooler, rx);

    let requeued = service.requeue_pending().await.unwrap();
    assert_eq!(requeued, 1);

    let settled = wait_for_settled(&pool, &orphan.id).await;
    assert_eq!(settled.status, PrintJobStatus::Completed);
    let args = std::fs::read_to_string(&marker).unwrap();
    assert!(args.contains("media=Custom.62x30mm"));
}

#[tokio::test]
async fn public_lookup_uses_first_image_as_primary() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;

    let record = item::create(&pool, sample_item("Photographed Thing")).await.unwrap();

    use stocktag_server::db::repository::item_image;
    item_image::add(&pool, &record.id, "items/x/first.jpg").await.unwrap();
    // Later attachment must not displace the primary
    tokio::time::sleep(Duration::from_millis(5)).await;
    item_image::add(&pool, &record.id, "items/x/second.jpg").await.unwrap();

    let found = item::find_by_short_id(&pool, &record.short_id)
        .await
        .unwrap()
        .expect("item by short id");
    assert_eq!(found.images.len(), 2);
    assert_eq!(found.images[0].path, "items/x/first.jpg");

    let primary = item_image::find_primary(&pool, &record.id).await.unwrap();
    assert_eq!(primary.unwrap().path, "items/x/first.jpg");
}

#[tokio::test]
async fn invalid_dates_are_rejected_before_commit() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_pool(dir.path()).await;

    let mut bad = sample_item("Bad Dates");
    bad.purchase_date = Some("not-a-date".to_string());
    let err = item::create(&pool, bad).await.unwrap_err();
    assert!(err.to_string().contains("purchase_date"));

    // Nothing was committed
    let all = item::find_all(&pool, None).await.unwrap();
    assert!(all.is_empty());
}
