// roster-client/examples/wizard_demo.rs
// Scripted wizard run: admin submission, then the employee listing
//
// Start the mock services first (`cargo run -p roster-mock`), or leave them
// down to watch the local fallback at work.

use roster_client::{
    ClientConfig, DurableStore, EmployeeListing, EmployeeRole, EmploymentType, RecordService, Role,
    Wizard, logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = ClientConfig::from_env();
    logger::init_from_config(&config);

    let store = DurableStore::open(&config.store_path)?;
    let service = RecordService::new(&config, store.clone())?;

    let mut wizard = Wizard::open(Role::Admin, service.clone(), store, config.timing);
    if !wizard.data().is_empty() {
        tracing::info!("Resuming saved draft");
    }

    let mut progress = wizard.submission().subscribe();
    let watcher = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let p = progress.borrow_and_update().clone();
            tracing::info!(percent = p.percent(), "{}", p.message);
        }
    });

    wizard.set_full_name("Jane Roe");
    wizard.set_email("jane.roe@example.com");
    wizard.set_department("Engineering");
    wizard.set_employee_role(EmployeeRole::Engineer);
    let employee_id = wizard.ensure_employee_id().await;
    tracing::info!(?employee_id, "Basic info filled in");

    if let Err(errors) = wizard.next() {
        anyhow::bail!("basic info invalid: {errors}");
    }

    wizard.attach_photo("image/png", &[0x89, b'P', b'N', b'G']);
    wizard.set_employment_type(EmploymentType::FullTime);
    wizard.set_office_location("Jakarta");
    if let Some(draft) = wizard.run_autosave().await {
        tracing::info!(timestamp = ?draft.timestamp, "Draft saved");
    }

    wizard
        .submit(|| tracing::info!("Submission finished"))
        .await?;
    drop(wizard);
    watcher.await?;

    let page = EmployeeListing::new(service).load_page(1).await;
    println!("Employees (page {} of {}):", page.page, page.total_pages.max(1));
    for row in &page.data {
        println!(
            "  {:<10} {:<20} {:<12} {:<8} {}",
            row.employee_id,
            row.name,
            row.department,
            row.role.as_str(),
            row.location
        );
    }

    Ok(())
}
