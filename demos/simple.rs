use robdd::bdd::Bdd;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let bdd = Bdd::default();
    println!("bdd = {:?}", bdd);

    let a = bdd.mk_var("a");
    let b = bdd.mk_var("b");
    let c = bdd.mk_var("c");
    let d = bdd.mk_var("d");

    let f1 = bdd.apply_or(a, b);
    println!("f1 = {}", bdd.to_bracket_string(f1));
    let f2 = bdd.apply_and(c, d);
    println!("f2 = {}", bdd.to_bracket_string(f2));
    let f3 = bdd.apply_and(f1, f2);
    println!("f3 = {}", bdd.to_bracket_string(f3));

    print!("{}", bdd.table_string());

    let nodes: Vec<String> = bdd.reachable_nodes(f3).iter().map(|n| n.get().to_string()).collect();
    println!("List of Nodes from Root: {}", nodes.join(" "));
    print!("{}", bdd.debug_tree(f3));

    bdd.check_invariants()?;
    println!("sat_count(f3) = {}", bdd.sat_count(f3));
    println!("ite cache: {}", bdd.ite_cache_stats());
    println!("cofactor cache: {}", bdd.cofactor_cache_stats());

    Ok(())
}
