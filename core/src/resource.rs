use crate::sys::check;
use linux_raw_sys::general::PRIO_PROCESS;
use proclab_process::{NiceValue, Pid, ProcError, ProcResult};
use syscalls::{Sysno, syscall};

/// Largest CPU index accepted by [`pin_to_cpu`].
pub const MAX_CPUS: usize = 1024;

/// Reads the nice value of process `pid` (0 means the caller).
pub fn get_nice(pid: Pid) -> ProcResult<NiceValue> {
    let prio = check("getpriority", unsafe {
        syscall!(Sysno::getpriority, PRIO_PROCESS as usize, pid as usize)
    })?;
    Ok(NiceValue::from_kernel_priority(prio))
}

pub fn set_nice(pid: Pid, nice: NiceValue) -> ProcResult<()> {
    check("setpriority", unsafe {
        syscall!(
            Sysno::setpriority,
            PRIO_PROCESS as usize,
            pid as usize,
            nice.get() as isize as usize
        )
    })?;
    Ok(())
}

/// Adds `increment` to the caller's own nice value and returns the new value.
///
/// Raising the value is always permitted; lowering it below the current one
/// needs `CAP_SYS_NICE` and otherwise fails with `EACCES`.
pub fn renice_self(increment: i32) -> ProcResult<NiceValue> {
    let current = get_nice(0)?;
    let wanted = current.bumped(increment);
    set_nice(0, wanted)?;
    debug!("[resource] nice {} -> {}", current, wanted);
    Ok(wanted)
}

/// Restricts the caller to a single CPU so that siblings pinned to the same
/// CPU contend for it.
pub fn pin_to_cpu(cpu: usize) -> ProcResult<()> {
    if cpu >= MAX_CPUS {
        return Err(ProcError::invalid(format!(
            "cpu {cpu} out of range (max {})",
            MAX_CPUS - 1
        )));
    }
    let mut mask = [0u64; MAX_CPUS / 64];
    mask[cpu / 64] |= 1 << (cpu % 64);
    check("sched_setaffinity", unsafe {
        syscall!(
            Sysno::sched_setaffinity,
            0usize,
            core::mem::size_of_val(&mask),
            mask.as_ptr() as usize
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::current_pid;

    #[test]
    fn own_nice_is_readable() {
        let nice = get_nice(0).unwrap();
        assert!((NiceValue::MIN..=NiceValue::MAX).contains(&nice.get()));
        assert_eq!(get_nice(current_pid()).unwrap(), nice);
    }

    #[test]
    fn unknown_pid_is_refused() {
        assert!(matches!(
            get_nice(999_999_999),
            Err(ProcError::Sys {
                op: "getpriority",
                ..
            })
        ));
    }

    #[test]
    fn cpu_out_of_range_is_rejected() {
        assert!(matches!(
            pin_to_cpu(MAX_CPUS),
            Err(ProcError::InvalidInput(_))
        ));
    }
}
