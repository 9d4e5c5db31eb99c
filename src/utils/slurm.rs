//! # Slurm 脚本生成工具
//!
//! 生成逐个运行 13 个 CP2K 单点计算的 sbatch 脚本。
//!
//! ## 依赖关系
//! - 被 `commands/ste_sp.rs` 使用
//! - 无外部模块依赖

/// Slurm 作业配置
#[derive(Debug, Clone)]
pub struct SlurmConfig {
    pub job_name: String,
    pub partition: String,
    pub nodes: u32,
    pub ntasks_per_node: u32,
    /// 日志基础名，生成 `<log_base>.log` / `<log_base>.err`
    pub log_base: String,
    pub cp2k_root: String,
    pub omp_threads: u32,
    pub mpi_np: u32,
    pub mpi_args: String,
}

impl Default for SlurmConfig {
    fn default() -> Self {
        SlurmConfig {
            job_name: "job".to_string(),
            partition: "normal".to_string(),
            nodes: 1,
            ntasks_per_node: 128,
            log_base: "job".to_string(),
            cp2k_root: "/home/think/app/cp2k-2024.1".to_string(),
            omp_threads: 2,
            mpi_np: 64,
            mpi_args: "-map-by ppr:4:L3cache:pe=2".to_string(),
        }
    }
}

/// 生成 sbatch 脚本内容
///
/// `image_stem` 为不含序号的输入名两端，如 ("CsPbBr3", "gs") 对应
/// `CsPbBr3_${i}_gs.inp`；`count` 为图像数。
pub fn generate_sbatch_script(
    config: &SlurmConfig,
    image_stem: (&str, &str),
    count: usize,
    exe: &str,
) -> String {
    let (prefix, suffix) = image_stem;

    format!(
        r#"#!/bin/bash
#SBATCH -J {job_name}
#SBATCH -p {partition}
#SBATCH -N {nodes}
#SBATCH --ntasks-per-node={ntasks}
#SBATCH -o {log}.log
#SBATCH -e {log}.err

export cp2kroot={cp2k_root}
source $cp2kroot/tools/toolchain/install/setup
export PATH=$cp2kroot/exe/local:$PATH
export OMP_PLACES=cores
export OMP_PROC_BIND=close
export OMP_STACKSIZE=512m
export OMP_NUM_THREADS={omp}


for i in $(seq 1 {count})
do
    input_file="{prefix}_${{i}}_{suffix}.inp"
    output_file="{prefix}_${{i}}_{suffix}.out"
    echo "task running $i/{count}"
    start_time=$(date +%s)
    mpirun -np {np} {mpi_args} {exe} $input_file > $output_file 2>&1
    status=$?
    end_time=$(date +%s)
    elapsed=$((end_time - start_time))
    if [ $status -eq 0 ]; then
        echo "task $i finished, take $elapsed s"
    else
        echo "task $i failed, exit code $status"
    fi
    echo ""
done

echo "All tasks completed."
"#,
        job_name = config.job_name,
        partition = config.partition,
        nodes = config.nodes,
        ntasks = config.ntasks_per_node,
        log = config.log_base,
        cp2k_root = config.cp2k_root,
        omp = config.omp_threads,
        count = count,
        prefix = prefix,
        suffix = suffix,
        np = config.mpi_np,
        mpi_args = config.mpi_args,
        exe = exe,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sbatch_script() {
        let config = SlurmConfig {
            job_name: "alice-CsPbBr3_gs".to_string(),
            log_base: "CsPbBr3_gs".to_string(),
            ..SlurmConfig::default()
        };
        let script = generate_sbatch_script(&config, ("CsPbBr3", "gs"), 13, "cp2k.psmp");

        assert!(script.starts_with("#!/bin/bash\n#SBATCH -J alice-CsPbBr3_gs\n"));
        assert!(script.contains("#SBATCH -p normal\n"));
        assert!(script.contains("#SBATCH --ntasks-per-node=128\n"));
        assert!(script.contains("#SBATCH -o CsPbBr3_gs.log\n"));
        assert!(script.contains("export OMP_NUM_THREADS=2\n"));
        assert!(script.contains("for i in $(seq 1 13)\n"));
        assert!(script.contains("input_file=\"CsPbBr3_${i}_gs.inp\""));
        assert!(script.contains(
            "mpirun -np 64 -map-by ppr:4:L3cache:pe=2 cp2k.psmp $input_file > $output_file 2>&1"
        ));
        assert!(script.trim_end().ends_with("echo \"All tasks completed.\""));
    }
}
