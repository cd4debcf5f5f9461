//! Daily run: sign in, open blind boxes, claim rights.
//!
//! Each stage goes through the retry runner. The first stage that exhausts its
//! retries aborts the rest, but the results file is written either way.

use std::path::{Path, PathBuf};

use crate::api::{JetourClient, Transport};
use crate::context::RunContext;
use crate::error::WorkerError;
use crate::outcome::Outcome;
use crate::output;
use crate::retry::{run_with_retry, RetryPolicy, Sleeper};

const BANNER: &str = "============================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SignIn,
    BlindBoxes,
    Rights,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::SignIn, Stage::BlindBoxes, Stage::Rights];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::SignIn => "签到",
            Stage::BlindBoxes => "拆盲盒",
            Stage::Rights => "领权益",
        }
    }
}

/// Where the run stopped. `stage` is `None` when setup (card account lookup) failed.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Option<Stage>,
    pub error: WorkerError,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub completed: Vec<(Stage, Outcome)>,
    pub failure: Option<StageFailure>,
    /// `None` when the results file could not be written.
    pub results_path: Option<PathBuf>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

pub struct Pipeline<'a, T: Transport> {
    client: &'a JetourClient<T>,
    policy: RetryPolicy,
    sleeper: &'a dyn Sleeper,
}

impl<'a, T: Transport> Pipeline<'a, T> {
    pub fn new(client: &'a JetourClient<T>, policy: RetryPolicy, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            client,
            policy,
            sleeper,
        }
    }

    /// Run every stage, then persist the run log into `output_dir`.
    pub fn run(&self, ctx: &mut RunContext, output_dir: &Path) -> PipelineReport {
        ctx.log.info(BANNER);
        ctx.log.info("捷途自动工作脚本开始执行");
        ctx.log.info(BANNER);

        let mut completed = Vec::new();
        let failure = self.run_stages(ctx, &mut completed).err();
        if let Some(f) = &failure {
            ctx.log.error(format!("执行过程中发生错误: {}", f.error));
        }

        let results_path = match output::write_results(output_dir, &ctx.log) {
            Ok(path) => {
                ctx.log.info(format!("执行结果已保存到 {}", path.display()));
                Some(path)
            }
            Err(e) => {
                ctx.log.error(format!("保存结果失败: {:#}", e));
                None
            }
        };

        ctx.log.info(BANNER);
        ctx.log.info("捷途自动工作脚本执行完成");
        ctx.log.info(BANNER);

        PipelineReport {
            completed,
            failure,
            results_path,
        }
    }

    fn run_stages(
        &self,
        ctx: &mut RunContext,
        completed: &mut Vec<(Stage, Outcome)>,
    ) -> Result<(), StageFailure> {
        self.prepare(ctx)
            .map_err(|error| StageFailure { stage: None, error })?;

        for stage in Stage::ALL {
            let outcome = self.run_stage(stage, ctx).map_err(|error| StageFailure {
                stage: Some(stage),
                error,
            })?;
            ctx.log
                .info(format!("{}结果: {}", stage.label(), outcome.message));
            completed.push((stage, outcome));
        }
        Ok(())
    }

    pub fn run_stage(&self, stage: Stage, ctx: &mut RunContext) -> Result<Outcome, WorkerError> {
        run_with_retry(&self.policy, self.sleeper, ctx, |ctx| match stage {
            Stage::SignIn => self.client.perform_sign_in(ctx),
            Stage::BlindBoxes => self.client.open_blind_boxes(ctx, self.sleeper),
            Stage::Rights => self.client.receive_rights(ctx),
        })
    }

    /// Resolve the card account id when it was not supplied.
    fn prepare(&self, ctx: &mut RunContext) -> Result<(), WorkerError> {
        if ctx.credentials.card_account_id.is_none() {
            ctx.log
                .info("未提供 JETOUR_CARD_ACCOUNT_ID，尝试从会员详情API自动获取...");
            match self.client.resolve_card_account_id(ctx) {
                Ok(id) => {
                    ctx.credentials.card_account_id = Some(id);
                    ctx.log.success("成功自动获取 card_account_id");
                }
                Err(e) => {
                    ctx.log
                        .error(format!("自动获取 card_account_id 失败: {}", e));
                    return Err(WorkerError::Config(
                        "无法获取 card_account_id，请检查配置".to_string(),
                    ));
                }
            }
        }
        ctx.log.info(format!(
            "初始化成功 - 使用 access_token: {}",
            ctx.credentials.token_hint()
        ));
        Ok(())
    }
}
