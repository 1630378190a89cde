use crate::{
    fixtures,
    io::pipe_sum,
    pipeline::{Fib, GenExt, fib_generator},
    strings::{join_into, split_into},
};
use anyhow::{Context, Result};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::num::Wrapping;
use std::time::{Duration, Instant};

/// Result of running a case body for a number of iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseOutcome {
    /// Time spent in the measured region only.
    pub elapsed: Duration,
    /// Wrapping sum of the per-iteration results.
    pub checksum: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reference point for the relative cases that follow it in its group.
    Baseline,
    Relative,
}

type Body = fn(u64) -> Result<CaseOutcome>;
type ParamBody = fn(u64, usize) -> Result<CaseOutcome>;

#[derive(Clone, Copy)]
enum CaseBody {
    Plain(Body),
    Param(ParamBody, usize),
}

#[derive(Clone, Copy)]
pub struct Case {
    name: &'static str,
    role: Role,
    body: CaseBody,
}

impl Case {
    pub(crate) const fn baseline(name: &'static str, body: Body) -> Self {
        Self {
            name,
            role: Role::Baseline,
            body: CaseBody::Plain(body),
        }
    }

    pub(crate) const fn relative(name: &'static str, body: Body) -> Self {
        Self {
            name,
            role: Role::Relative,
            body: CaseBody::Plain(body),
        }
    }

    pub(crate) const fn param(name: &'static str, role: Role, body: ParamBody, param: usize) -> Self {
        Self {
            name,
            role,
            body: CaseBody::Param(body, param),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn param_value(&self) -> Option<usize> {
        match self.body {
            CaseBody::Plain(_) => None,
            CaseBody::Param(_, value) => Some(value),
        }
    }

    /// Display name, with the parameter in parentheses for parameterized cases.
    pub fn label(&self) -> String {
        match self.param_value() {
            Some(value) => format!("{}({})", self.name, value),
            None => self.name.to_string(),
        }
    }

    pub fn run(&self, iters: u64) -> Result<CaseOutcome> {
        let outcome = match self.body {
            CaseBody::Plain(body) => body(iters),
            CaseBody::Param(body, value) => body(iters, value),
        };
        outcome.with_context(|| format!("case {} failed after {} iterations", self.label(), iters))
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case")
            .field("label", &self.label())
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug)]
pub struct CaseGroup {
    pub key: &'static str,
    pub title: &'static str,
    pub cases: &'static [Case],
}

pub fn catalogue() -> &'static [CaseGroup] {
    CATALOGUE
}

fn timed(iters: u64, mut body: impl FnMut() -> i64) -> CaseOutcome {
    let mut checksum = 0i64;
    let start = Instant::now();
    for _ in 0..iters {
        checksum = checksum.wrapping_add(black_box(body()));
    }
    let elapsed = start.elapsed();
    CaseOutcome {
        elapsed,
        checksum: black_box(checksum),
    }
}

// Sum

fn sum_basic_no_gen(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let limit = black_box(fixtures::TEST_SIZE as i64);
        let mut s = 0i64;
        let mut i = 0;
        while i < limit {
            s += i;
            i += 1;
        }
        s
    }))
}

fn sum_basic_gen(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let limit = black_box(fixtures::TEST_SIZE as i64);
        (0..limit).sum()
    }))
}

fn sum_vector_no_gen(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    Ok(timed(iters, || {
        let mut s = 0i32;
        for &i in black_box(v) {
            s += i;
        }
        i64::from(s)
    }))
}

fn sum_vector_gen(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    Ok(timed(iters, || i64::from(black_box(v).iter().sum::<i32>())))
}

// Count

const COUNT_SEED: u64 = 0xc0_ffee;

fn count_vector_no_gen(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    Ok(timed(iters, || {
        let mut rng = SmallRng::seed_from_u64(COUNT_SEED);
        let mut s = 0i64;
        for &i in v {
            if i * 2 < rng.gen_range(0..fixtures::RAND_LIMIT) {
                s += 1;
            }
        }
        s
    }))
}

fn count_vector_gen(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    Ok(timed(iters, || {
        let mut rng = SmallRng::seed_from_u64(COUNT_SEED);
        v.iter()
            .filter(|&&i| i * 2 < rng.gen_range(0..fixtures::RAND_LIMIT))
            .count() as i64
    }))
}

// Fibonacci

fn eager_fib(limit: usize) -> Vec<Wrapping<u64>> {
    let mut ret = Vec::new();
    let mut a = Wrapping(0u64);
    let mut b = Wrapping(1u64);
    let mut i = 0;
    while i * 2 < limit {
        a += b;
        ret.push(a);
        b += a;
        ret.push(b);
        i += 1;
    }
    ret
}

fn fib_sum_no_gen(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let mut s = Wrapping(0u64);
        for v in eager_fib(black_box(fixtures::TEST_SIZE)) {
            s += v;
        }
        s.0 as i64
    }))
}

fn fib_sum_gen(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let s: Wrapping<u64> = fib_generator().take(black_box(fixtures::TEST_SIZE)).sum();
        s.0 as i64
    }))
}

fn fib_sum_gen_static(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let s: Wrapping<u64> = Fib::new().take(black_box(fixtures::TEST_SIZE)).sum();
        s.0 as i64
    }))
}

// Virtualized stages

const VIRTUAL_SEQ_LAST: u64 = 10_000;

fn square(x: Wrapping<u64>) -> Wrapping<u64> {
    x * x
}

fn numbers() -> impl Iterator<Item = Wrapping<u64>> {
    (1..=black_box(VIRTUAL_SEQ_LAST)).map(Wrapping)
}

fn virtual_gen_0(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let quads = numbers().map(square).map(square);
        quads.sum::<Wrapping<u64>>().0 as i64
    }))
}

fn virtual_gen_1(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let quads = numbers().virtualized().map(square).map(square);
        quads.sum::<Wrapping<u64>>().0 as i64
    }))
}

fn virtual_gen_2(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let quads = numbers().virtualized().map(square).virtualized().map(square);
        quads.sum::<Wrapping<u64>>().0 as i64
    }))
}

fn virtual_gen_3(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let quads = numbers()
            .virtualized()
            .map(square)
            .virtualized()
            .map(square)
            .virtualized();
        quads.sum::<Wrapping<u64>>().0 as i64
    }))
}

// Concat

fn concat_no_gen(iters: u64) -> Result<CaseOutcome> {
    let vv = fixtures::test_vector_vector();
    Ok(timed(iters, || {
        let mut s = 0i64;
        for v in black_box(vv) {
            for &i in v {
                s += i64::from(i);
            }
        }
        s
    }))
}

fn concat_gen(iters: u64) -> Result<CaseOutcome> {
    let vv = fixtures::test_vector_vector();
    Ok(timed(iters, || black_box(vv).iter().flatten().map(|&i| i64::from(i)).sum()))
}

// Composed

fn square_i64(x: &i32) -> i64 {
    i64::from(*x) * i64::from(*x)
}

fn composed_no_gen(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    Ok(timed(iters, || {
        let mut s = 0i64;
        for i in black_box(v) {
            s += square_i64(i);
        }
        s
    }))
}

fn composed_gen(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    // Operator chain built once, applied to a fresh source each iteration.
    let sum_sq = |source: std::slice::Iter<'_, i32>| source.map(square_i64).sum::<i64>();
    Ok(timed(iters, || sum_sq(black_box(v).iter())))
}

fn composed_gen_regular(iters: u64) -> Result<CaseOutcome> {
    let v = fixtures::test_vector();
    Ok(timed(iters, || black_box(v).iter().map(square_i64).sum()))
}

// Sample

const SAMPLE_SEQ_LAST: u64 = 10 * 1000 * 1000;
const SAMPLE_SIZE: usize = 1000;
const SAMPLE_SEED: u64 = 0x5a3b_1e;

fn sample(iters: u64) -> Result<CaseOutcome> {
    let mut rng = SmallRng::seed_from_u64(SAMPLE_SEED);
    Ok(timed(iters, || {
        let sampled: u64 = (1..=black_box(SAMPLE_SEQ_LAST)).sample(SAMPLE_SIZE, &mut rng).sum();
        sampled as i64
    }))
}

// Resplit

fn string_resplitter_big(iters: u64) -> Result<CaseOutcome> {
    let big = fixtures::big_lines();
    Ok(timed(iters, || {
        std::iter::once(black_box(big))
            .resplit('\n')
            .map(|line| line.len())
            .sum::<usize>() as i64
    }))
}

fn string_resplitter_small(iters: u64) -> Result<CaseOutcome> {
    let small = fixtures::small_lines();
    Ok(timed(iters, || {
        black_box(small)
            .iter()
            .resplit('\n')
            .map(|line| line.len())
            .sum::<usize>() as i64
    }))
}

// Split

fn string_split_old(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        let mut parts = Vec::new();
        split_into(' ', black_box(fixtures::LINE), &mut parts);
        parts.len() as i64
    }))
}

fn string_split_gen_vector(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        black_box(fixtures::LINE).split(' ').collect::<Vec<_>>().len() as i64
    }))
}

fn string_split_old_reuse_vector(iters: u64) -> Result<CaseOutcome> {
    let mut parts = Vec::new();
    Ok(timed(iters, || {
        parts.clear();
        split_into(' ', black_box(fixtures::LINE), &mut parts);
        parts.len() as i64
    }))
}

fn string_split_gen_reuse_vector(iters: u64) -> Result<CaseOutcome> {
    let mut parts = Vec::new();
    Ok(timed(iters, || {
        parts.clear();
        black_box(fixtures::LINE).split(' ').append_to(&mut parts);
        parts.len() as i64
    }))
}

fn string_split_gen(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || black_box(fixtures::LINE).split(' ').count() as i64))
}

fn string_split_gen_take(iters: u64) -> Result<CaseOutcome> {
    Ok(timed(iters, || {
        black_box(fixtures::LINE).split(' ').take(10).count() as i64
    }))
}

// Unsplit

fn string_unsplit_old(iters: u64) -> Result<CaseOutcome> {
    let strs = fixtures::test_str_vector();
    Ok(timed(iters, || {
        let mut joined = String::new();
        join_into(',', black_box(strs), &mut joined);
        joined.len() as i64
    }))
}

fn string_unsplit_old_reused_buffer(iters: u64) -> Result<CaseOutcome> {
    let strs = fixtures::test_str_vector();
    let mut joined = String::new();
    Ok(timed(iters, || {
        joined.clear();
        join_into(',', black_box(strs), &mut joined);
        joined.len() as i64
    }))
}

fn string_unsplit_gen(iters: u64) -> Result<CaseOutcome> {
    let strs = fixtures::test_str_vector();
    Ok(timed(iters, || {
        let joined = black_box(strs).iter().unsplit(',');
        joined.len() as i64
    }))
}

fn string_unsplit_gen_reused_buffer(iters: u64) -> Result<CaseOutcome> {
    let strs = fixtures::test_str_vector();
    let mut buffer = String::new();
    Ok(timed(iters, || {
        buffer.clear();
        black_box(strs).iter().unsplit_into(',', &mut buffer);
        buffer.len() as i64
    }))
}

const UNSPLIT_PARAM_SEED: u64 = 0x00de_c0de;

fn string_unsplit_gen_param(iters: u64, join_size: usize) -> Result<CaseOutcome> {
    let v = fixtures::random_strings(join_size, UNSPLIT_PARAM_SEED);
    let mut buffer = String::new();
    Ok(timed(iters, || {
        buffer.clear();
        black_box(&v).iter().unsplit_into(',', &mut buffer);
        buffer.len() as i64
    }))
}

// Pipes

fn by_line_pipes(iters: u64) -> Result<CaseOutcome> {
    let run = pipe_sum(iters)?;
    Ok(CaseOutcome {
        elapsed: run.elapsed,
        checksum: black_box(run.sum),
    })
}

static CATALOGUE: &[CaseGroup] = &[
    CaseGroup {
        key: "sum_basic",
        title: "Sum over an integer range",
        cases: &[
            Case::baseline("Sum_Basic_NoGen", sum_basic_no_gen),
            Case::relative("Sum_Basic_Gen", sum_basic_gen),
        ],
    },
    CaseGroup {
        key: "sum_vector",
        title: "Sum over the random vector",
        cases: &[
            Case::baseline("Sum_Vector_NoGen", sum_vector_no_gen),
            Case::relative("Sum_Vector_Gen", sum_vector_gen),
        ],
    },
    CaseGroup {
        key: "count_vector",
        title: "Filtered count with a random predicate",
        cases: &[
            Case::baseline("Count_Vector_NoGen", count_vector_no_gen),
            Case::relative("Count_Vector_Gen", count_vector_gen),
        ],
    },
    CaseGroup {
        key: "fib_sum",
        title: "Fibonacci prefix sum",
        cases: &[
            Case::baseline("Fib_Sum_NoGen", fib_sum_no_gen),
            Case::relative("Fib_Sum_Gen", fib_sum_gen),
            Case::relative("Fib_Sum_Gen_Static", fib_sum_gen_static),
        ],
    },
    CaseGroup {
        key: "virtual_gen",
        title: "Boxed pipeline stages",
        cases: &[
            Case::baseline("VirtualGen_0Virtual", virtual_gen_0),
            Case::relative("VirtualGen_1Virtual", virtual_gen_1),
            Case::relative("VirtualGen_2Virtual", virtual_gen_2),
            Case::relative("VirtualGen_3Virtual", virtual_gen_3),
        ],
    },
    CaseGroup {
        key: "concat",
        title: "Flattened nested vectors",
        cases: &[
            Case::baseline("Concat_NoGen", concat_no_gen),
            Case::relative("Concat_Gen", concat_gen),
        ],
    },
    CaseGroup {
        key: "composed",
        title: "Sum of squares",
        cases: &[
            Case::baseline("Composed_NoGen", composed_no_gen),
            Case::relative("Composed_Gen", composed_gen),
            Case::relative("Composed_GenRegular", composed_gen_regular),
        ],
    },
    CaseGroup {
        key: "sample",
        title: "Reservoir sample of ten million",
        cases: &[Case::baseline("Sample", sample)],
    },
    CaseGroup {
        key: "string_resplitter",
        title: "Re-split chunked text into lines",
        cases: &[
            Case::baseline("StringResplitter_Big", string_resplitter_big),
            Case::relative("StringResplitter_Small", string_resplitter_small),
        ],
    },
    CaseGroup {
        key: "string_split",
        title: "Split one line into a fresh vector",
        cases: &[
            Case::baseline("StringSplit_Old", string_split_old),
            Case::relative("StringSplit_Gen_Vector", string_split_gen_vector),
        ],
    },
    CaseGroup {
        key: "string_split_reuse",
        title: "Split one line reusing storage",
        cases: &[
            Case::baseline("StringSplit_Old_ReuseVector", string_split_old_reuse_vector),
            Case::relative("StringSplit_Gen_ReuseVector", string_split_gen_reuse_vector),
            Case::relative("StringSplit_Gen", string_split_gen),
            Case::relative("StringSplit_Gen_Take", string_split_gen_take),
        ],
    },
    CaseGroup {
        key: "string_unsplit",
        title: "Join the numeric strings",
        cases: &[
            Case::baseline("StringUnsplit_Old", string_unsplit_old),
            Case::relative("StringUnsplit_Old_ReusedBuffer", string_unsplit_old_reused_buffer),
            Case::relative("StringUnsplit_Gen", string_unsplit_gen),
            Case::relative("StringUnsplit_Gen_ReusedBuffer", string_unsplit_gen_reused_buffer),
        ],
    },
    CaseGroup {
        key: "string_unsplit_param",
        title: "Join scaling with input size",
        cases: &[
            Case::param("StringUnsplit_Gen", Role::Baseline, string_unsplit_gen_param, 1000),
            Case::param("StringUnsplit_Gen", Role::Relative, string_unsplit_gen_param, 2000),
            Case::param("StringUnsplit_Gen", Role::Relative, string_unsplit_gen_param, 4000),
            Case::param("StringUnsplit_Gen", Role::Relative, string_unsplit_gen_param, 8000),
        ],
    },
    CaseGroup {
        key: "by_line",
        title: "Line streaming through a pipe",
        cases: &[Case::baseline("ByLine_Pipes", by_line_pipes)],
    },
];
