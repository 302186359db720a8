use std::time::Instant;

use clap::Parser;
use log::info;

use heap_synth::config::GuardConfig;
use heap_synth::domain::{Domain, HeapDomain};
use heap_synth::expr::{Expr, Lvalue, Stmt};
use heap_synth::guard::Guard;
use heap_synth::plan::Plan;
use heap_synth::relation::TransitionRelation;
use heap_synth::render::pretty;
use heap_synth::store::{Store, Successor};
use heap_synth::symbols::SymbolTable;
use heap_synth::types::{Type, VarRole};
use heap_synth::value::Value;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Length of the example list.
    #[arg(value_name = "INT", default_value = "3")]
    len: usize,

    /// Number of guards to print.
    #[clap(long, value_name = "INT", default_value = "20")]
    top: usize,

    /// Remove structurally equal guards.
    #[clap(long)]
    dedup: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    verbose: bool,
}

/// Straightforward deterministic semantics: reading through `null` or an
/// uninitialized variable faults.
struct Interpreter;

impl Interpreter {
    fn eval(store: &Store, expr: &Expr) -> Option<Value> {
        match *expr {
            Expr::Var(v) => store.eval_var(v),
            Expr::Deref(v, f) => store.eval_field(store.eval_var(v)?.as_obj()?, f),
            Expr::Int(n) => Some(Value::Int(n)),
            Expr::Null => Some(Value::Null),
            Expr::New(_) => None,
        }
    }

    fn exec(store: &Store, stmt: &Stmt) -> Option<Store> {
        let (store, value) = match stmt.rhs {
            Expr::New(ty) => {
                let (store, obj) = store.allocate(ty);
                (store, Value::Obj(obj))
            }
            ref rhs => (store.clone(), Self::eval(store, rhs)?),
        };
        match stmt.lhs {
            Lvalue::Var(v) => Some(store.assign(v, value)),
            Lvalue::Field(v, f) => {
                let obj = store.eval_var(v)?.as_obj()?;
                store.write_field(obj, f, value).ok()
            }
        }
    }

    fn holds(store: &Store, guard: &Guard) -> Option<bool> {
        Some(match guard {
            Guard::True => true,
            Guard::Eq(l, r) => Self::eval(store, l)? == Self::eval(store, r)?,
            Guard::Lt(l, r) => {
                let l = Self::eval(store, l)?.as_int()?;
                l < Self::eval(store, r)?.as_int()?
            }
            Guard::Not(g) => !Self::holds(store, g)?,
            Guard::And(l, r) => Self::holds(store, l)? && Self::holds(store, r)?,
            Guard::Or(l, r) => Self::holds(store, l)? || Self::holds(store, r)?,
        })
    }
}

impl TransitionRelation for Interpreter {
    fn apply(&self, store: &Store, stmt: &Stmt) -> Vec<Successor> {
        vec![Self::exec(store, stmt).map_or(Successor::Fault, Successor::Store)]
    }

    fn test(&self, guard: &Guard, store: &Store) -> Option<bool> {
        Self::holds(store, guard)
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = Instant::now();
    println!("args = {:?}", args);

    // Node { next: Node, val: int }, with a list head and two cursors.
    let mut symbols = SymbolTable::new();
    let node = symbols.declare_ref_type("Node")?;
    let next = symbols.declare_field(node, "next", Type::Ref(node), false)?;
    let val = symbols.declare_field(node, "val", Type::Int, false)?;
    let head = symbols.declare_var("head", Type::Ref(node), VarRole::Arg, true)?;
    let cur = symbols.declare_var("cur", Type::Ref(node), VarRole::Temp, false)?;
    symbols.declare_var("prev", Type::Ref(node), VarRole::Temp, false)?;
    let key = symbols.declare_var("key", Type::Int, VarRole::Arg, false)?;

    let config = GuardConfig {
        deduplicate: args.dedup,
        ..GuardConfig::default()
    };
    let domain = HeapDomain::with_config(symbols, Interpreter, config);
    print!("{}", domain.report());
    let symbols = domain.symbols().clone();

    // head -> o0 -> o1 -> ... -> null, with values 10, 20, ...
    let mut store = Store::new();
    let mut nodes = Vec::with_capacity(args.len);
    for _ in 0..args.len {
        let (next_store, obj) = store.allocate(node);
        store = next_store;
        nodes.push(obj);
    }
    for (i, &obj) in nodes.iter().enumerate() {
        let succ = nodes.get(i + 1).map_or(Value::Null, |&o| Value::Obj(o));
        store = store
            .write_field(obj, next, succ)?
            .write_field(obj, val, Value::Int(10 * (i as i64 + 1)))?;
    }
    let head_value = nodes.first().map_or(Value::Null, |&o| Value::Obj(o));
    store = store.assign(head, head_value).assign(key, Value::Int(20));
    store.check(&symbols)?;
    println!("input: {}", pretty(&symbols, &store));

    // Walk `cur` down the list as far as the domain lets us.
    let mut plan = Plan::new(store);
    let start = Stmt::assign(cur, Expr::Var(head));
    let step = Stmt::assign(cur, Expr::Deref(cur, next));
    let mut action = start;
    while let Some(state) = domain.apply(&action, plan.last_state()) {
        let shown = pretty(&symbols, &action).to_string();
        println!("  {:<20} {}", shown, pretty(&symbols, &state));
        plan.push(action, state);
        action = step.clone();
    }
    info!("plan of {} steps, stuck at `{}`", plan.len(), pretty(&symbols, &action));

    let time_guards = Instant::now();
    let plans = [plan];
    let guards = domain.generate_guards(&plans);
    info!(
        "generated {} guards in {:.3} s",
        guards.len(),
        time_guards.elapsed().as_secs_f64()
    );

    let first = plans[0].first_state();
    for guard in guards.iter().take(args.top) {
        let verdict = domain.test(guard, first);
        let mark = if verdict { 'T' } else { ' ' };
        println!("  [{}] {:>2} {}", mark, guard.size(), pretty(&symbols, guard));
    }

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
