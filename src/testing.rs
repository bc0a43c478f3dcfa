//! Test doubles for the cloud, host and process boundaries.

use crate::cloud::{CallerIdentity, CloudProvider, RoleRequest, SecurityGroup, Subnet, Vpc};
use crate::core::host::Host;
use crate::transport::{CommandRunner, Invocation};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

/// Scripted AWS account. Every call is appended to `calls`.
pub struct FakeCloud {
    pub region: Option<String>,
    pub identity: Result<CallerIdentity, String>,
    pub vpcs: Vec<Vpc>,
    pub security_groups: Vec<SecurityGroup>,
    pub subnets: Vec<Subnet>,
    /// Outcomes for successive create_bucket calls; empty means success.
    pub bucket_results: RefCell<VecDeque<Result<(), String>>>,
    pub fail_create_policy: bool,
    pub fail_attach: bool,
    pub calls: RefCell<Vec<String>>,
    pub buckets: RefCell<Vec<(String, String)>>,
    pub policies: RefCell<Vec<(String, String)>>,
    pub roles: RefCell<Vec<RoleRequest>>,
    pub attachments: RefCell<Vec<(String, String)>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self {
            region: Some("us-west-2".to_string()),
            identity: Ok(CallerIdentity {
                account: "123456789012".to_string(),
                arn: "arn:aws:iam::123456789012:user/alice".to_string(),
            }),
            vpcs: vec![
                Vpc { vpc_id: "vpc-other".into(), is_default: false },
                Vpc { vpc_id: "vpc-default".into(), is_default: true },
            ],
            security_groups: vec![
                SecurityGroup {
                    group_id: "sg-default".into(),
                    group_name: "default".into(),
                    vpc_id: Some("vpc-default".into()),
                },
                SecurityGroup {
                    group_id: "sg-web".into(),
                    group_name: "web".into(),
                    vpc_id: Some("vpc-default".into()),
                },
                SecurityGroup {
                    group_id: "sg-other-default".into(),
                    group_name: "default".into(),
                    vpc_id: Some("vpc-other".into()),
                },
                SecurityGroup {
                    group_id: "sg-classic".into(),
                    group_name: "default".into(),
                    vpc_id: None,
                },
            ],
            subnets: vec![
                Subnet { subnet_id: "subnet-a".into(), vpc_id: "vpc-default".into(), default_for_az: true },
                Subnet { subnet_id: "subnet-b".into(), vpc_id: "vpc-default".into(), default_for_az: true },
                Subnet { subnet_id: "subnet-private".into(), vpc_id: "vpc-default".into(), default_for_az: false },
                Subnet { subnet_id: "subnet-x".into(), vpc_id: "vpc-other".into(), default_for_az: true },
            ],
            bucket_results: RefCell::new(VecDeque::new()),
            fail_create_policy: false,
            fail_attach: false,
            calls: RefCell::new(Vec::new()),
            buckets: RefCell::new(Vec::new()),
            policies: RefCell::new(Vec::new()),
            roles: RefCell::new(Vec::new()),
            attachments: RefCell::new(Vec::new()),
        }
    }

    /// Queue `failures` failing bucket creations.
    pub fn failing_buckets(self, failures: usize) -> Self {
        for i in 0..failures {
            self.bucket_results
                .borrow_mut()
                .push_back(Err(format!("BucketAlreadyExists #{}", i + 1)));
        }
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl CloudProvider for FakeCloud {
    fn configured_region(&self) -> Result<Option<String>, String> {
        self.log("configured_region");
        Ok(self.region.clone())
    }

    fn caller_identity(&self) -> Result<CallerIdentity, String> {
        self.log("caller_identity");
        self.identity.clone()
    }

    fn describe_vpcs(&self) -> Result<Vec<Vpc>, String> {
        self.log("describe_vpcs");
        Ok(self.vpcs.clone())
    }

    fn describe_security_groups(&self) -> Result<Vec<SecurityGroup>, String> {
        self.log("describe_security_groups");
        Ok(self.security_groups.clone())
    }

    fn describe_subnets(&self) -> Result<Vec<Subnet>, String> {
        self.log("describe_subnets");
        Ok(self.subnets.clone())
    }

    fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), String> {
        self.log("create_bucket");
        self.buckets
            .borrow_mut()
            .push((bucket.to_string(), region.to_string()));
        self.bucket_results.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn create_policy(&self, policy_name: &str, document: &str) -> Result<String, String> {
        self.log("create_policy");
        if self.fail_create_policy {
            return Err("EntityAlreadyExists".to_string());
        }
        self.policies
            .borrow_mut()
            .push((policy_name.to_string(), document.to_string()));
        Ok(format!("arn:aws:iam::123456789012:policy/{}", policy_name))
    }

    fn create_role(&self, request: &RoleRequest) -> Result<String, String> {
        self.log("create_role");
        self.roles.borrow_mut().push(request.clone());
        Ok(format!("arn:aws:iam::123456789012:role/{}", request.role_name))
    }

    fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<(), String> {
        self.log("attach_role_policy");
        if self.fail_attach {
            return Err("NoSuchEntity".to_string());
        }
        self.attachments
            .borrow_mut()
            .push((role_name.to_string(), policy_arn.to_string()));
        Ok(())
    }
}

/// Host with a fixed cwd and env and a clock that advances one second per read.
pub struct FakeHost {
    pub cwd: Option<PathBuf>,
    pub vars: HashMap<String, String>,
    pub clock: Cell<u64>,
    pub sleeps: RefCell<Vec<Duration>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            cwd: Some(PathBuf::from("/home/ec2-user/environment")),
            vars: HashMap::new(),
            // 2020-10-15T10:10:10Z
            clock: Cell::new(1_602_756_610),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Host for FakeHost {
    fn current_dir(&self) -> Result<PathBuf, String> {
        self.cwd
            .clone()
            .ok_or_else(|| "cannot access working directory: No such file or directory".to_string())
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn now_epoch_secs(&self) -> u64 {
        let now = self.clock.get();
        self.clock.set(now + 1);
        now
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }

    fn backoff_secs(&self, min: u64, _max: u64) -> u64 {
        min
    }
}

/// Records invocations and answers with scripted exit codes (default 0).
pub struct FakeRunner {
    pub exit_codes: RefCell<VecDeque<Result<i32, String>>>,
    pub invocations: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            exit_codes: RefCell::new(VecDeque::new()),
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn with_results(results: Vec<Result<i32, String>>) -> Self {
        Self {
            exit_codes: RefCell::new(results.into()),
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, String> {
        self.invocations.borrow_mut().push(invocation.clone());
        self.exit_codes.borrow_mut().pop_front().unwrap_or(Ok(0))
    }
}
