//! Command handlers.
//!
//! Each handler maps parsed arguments to one store or wizard operation and
//! renders the markdown result. Wizard commands load the stored session,
//! apply a single step and save it again.

use std::{fs, io::Read, path::Path};

use almanac_core::{
    display::{Actions, CreateResult, DeleteResult, Devices, Gateways, Jobs, UpdateResult},
    models::{Snapshot, WeekdaySet},
    params::{AgendaQuery, Id, SelectTime},
    OperationStatus, ScheduleStore, ScheduleWizard,
};
use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    args::{
        AgendaArgs, DeleteJobArgs, DeviceCommands, ImportArgs, JobCommands, ScheduleCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    store: ScheduleStore,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: ScheduleStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    pub async fn import(&self, args: ImportArgs) -> Result<()> {
        let raw = read_input(&args.file)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid snapshot in {}", args.file.display()))?;
        let summary = self.store.import_snapshot(snapshot).await?;
        self.renderer.render(&summary.to_string())
    }

    pub async fn agenda(&self, args: &AgendaArgs) -> Result<()> {
        let agenda = self.store.agenda(&AgendaQuery::from(args)).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&agenda)?);
            return Ok(());
        }
        self.renderer.render(&agenda.to_string())
    }

    pub async fn handle_device_command(&self, command: Option<DeviceCommands>) -> Result<()> {
        match command.unwrap_or(DeviceCommands::List) {
            DeviceCommands::List => {
                let devices = Devices(self.store.list_devices().await?);
                self.renderer.render(&devices.to_string())
            }
            DeviceCommands::Actions(args) => {
                let actions = self.store.available_actions(&args.into()).await?;
                self.renderer.render(&Actions(actions).to_string())
            }
        }
    }

    pub async fn list_gateways(&self) -> Result<()> {
        let gateways = Gateways(self.store.list_gateways().await?);
        self.renderer.render(&gateways.to_string())
    }

    pub async fn handle_job_command(&self, command: JobCommands) -> Result<()> {
        match command {
            JobCommands::List => {
                let jobs = Jobs(self.store.list_jobs().await?);
                self.renderer.render(&jobs.to_string())
            }
            JobCommands::Show(args) => {
                let id = Id::from(args);
                let job = self
                    .store
                    .get_job(&id)
                    .await?
                    .with_context(|| format!("Schedule {} not found", id.id))?;
                self.renderer.render(&job.to_string())
            }
            JobCommands::Delete(args) => self.delete_job(args).await,
        }
    }

    async fn delete_job(&self, args: DeleteJobArgs) -> Result<()> {
        let id = Id { id: args.id };
        let job = self
            .store
            .get_job(&id)
            .await?
            .with_context(|| format!("Schedule {} not found", id.id))?;

        if !args.confirm {
            let status = OperationStatus::failure(format!(
                "Deleting schedule {} requires --confirm",
                id.id
            ));
            return self.renderer.render(&status.to_string());
        }

        self.store.delete_job(&id).await?;
        self.renderer.render(&DeleteResult::new(job).to_string())
    }

    pub async fn handle_schedule_command(&self, command: ScheduleCommands) -> Result<()> {
        let wizard = match command {
            ScheduleCommands::New => self.store.start_session().await?,
            ScheduleCommands::Edit(args) => self.store.start_edit_session(&args.into()).await?,
            ScheduleCommands::Show => self.store.session().await?,
            ScheduleCommands::Payload => {
                let payload = self.store.session().await?.to_submission_payload()?;
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }
            ScheduleCommands::Actions => {
                let actions = self.store.session().await?.available_actions();
                return self.renderer.render(&Actions(actions).to_string());
            }
            ScheduleCommands::Submit => return self.submit().await,
            ScheduleCommands::Cancel => {
                info!("Discarding the schedule in progress");
                let status = if self.store.clear_session().await? {
                    OperationStatus::success("Schedule discarded")
                } else {
                    OperationStatus::failure("No schedule in progress")
                };
                return self.renderer.render(&status.to_string());
            }
            ScheduleCommands::Device(args) => {
                let id = Id::from(args);
                let device = self
                    .store
                    .get_device(&id)
                    .await?
                    .with_context(|| format!("Device {} not found", id.id))?;
                self.update_session(|wizard| wizard.select_device(&device))
                    .await?
            }
            ScheduleCommands::Action(args) => {
                let value = args.value();
                self.update_session(|wizard| wizard.select_action(args.method, value))
                    .await?
            }
            ScheduleCommands::Time(args) => {
                let select = SelectTime::try_from(args)?;
                self.update_session(|wizard| wizard.select_time(&select))
                    .await?
            }
            ScheduleCommands::Days(args) => {
                let days = WeekdaySet::try_from(args)?;
                self.update_session(|wizard| wizard.select_days(days))
                    .await?
            }
            ScheduleCommands::Active(args) => {
                self.update_session(|wizard| {
                    wizard.set_active_state(args.state.into());
                    Ok(())
                })
                .await?
            }
            ScheduleCommands::Advanced(args) => {
                self.update_session(|wizard| {
                    wizard.set_advanced(args.apply_to(wizard.draft().advanced));
                    Ok(())
                })
                .await?
            }
            ScheduleCommands::Goto(args) => {
                self.update_session(|wizard| wizard.goto(args.step))
                    .await?
            }
            ScheduleCommands::Back => {
                self.update_session(ScheduleWizard::return_to_caller)
                    .await?
            }
        };
        self.renderer.render(&wizard.to_string())
    }

    /// Applies one wizard step to the stored session and saves it.
    ///
    /// A rejected step leaves the stored session untouched.
    async fn update_session<F>(&self, step: F) -> Result<ScheduleWizard>
    where
        F: FnOnce(&mut ScheduleWizard) -> almanac_core::Result<()>,
    {
        let mut wizard = self.store.session().await?;
        debug!("Applying a step to the session on {}", wizard.step());
        step(&mut wizard)?;
        self.store.save_session(&wizard).await?;
        Ok(wizard)
    }

    async fn submit(&self) -> Result<()> {
        let editing = self
            .store
            .load_session()
            .await?
            .is_some_and(|wizard| wizard.is_editing());

        let id = match self.store.submit_session().await {
            Ok(id) => id,
            Err(e) => {
                if let Some(wizard) = self.store.load_session().await? {
                    self.renderer.render(&wizard.to_string())?;
                }
                if e.is_retryable_submission() {
                    let hint = OperationStatus::failure(
                        "The draft was kept. Run `alm schedule submit` again to retry.",
                    );
                    self.renderer.render(&hint.to_string())?;
                }
                return Err(e).context("Failed to save the schedule");
            }
        };

        let job = self
            .store
            .get_job(&Id { id })
            .await?
            .with_context(|| format!("Schedule {id} not found after saving"))?;
        if editing {
            self.renderer.render(&UpdateResult::new(job).to_string())
        } else {
            self.renderer.render(&CreateResult::new(job).to_string())
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read standard input")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
