use pretty_assertions::assert_eq;
use rhizome_ptree::ir::{CapturedClosure, ClosureRef, LocalTable, Node, NodeKind};
use rhizome_ptree::sexpr::parse;
use rhizome_ptree::{Options, ParseTree, Runtime, SExpr, TypeDef};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sx(text: &str) -> SExpr {
    parse(text).unwrap()
}

fn lit(v: i64) -> Node {
    Node::lit(v)
}

fn array(elems: Vec<Node>) -> Node {
    Node::array(elems)
}

fn konst(name: &str) -> Node {
    Node::var(NodeKind::Const, name)
}

fn dvar(name: &str) -> Node {
    Node::var(NodeKind::Dvar, name)
}

fn gvar(name: &str) -> Node {
    Node::var(NodeKind::Gvar, name)
}

fn call1(recv: Node, mid: &str, arg: Node) -> Node {
    Node::call(recv, mid, Some(array(vec![arg])))
}

fn puts(arg: Node) -> Node {
    Node::fcall("puts", Some(array(vec![arg])))
}

/// A method body: `(scope (block (args ...) stmts...))`.
fn body(locals: &[&str], required: i64, stmts: Vec<Node>) -> Node {
    let mut block = vec![Node::args(required, None, -1)];
    block.extend(stmts);
    Node::scope(
        Some(LocalTable::with_locals(locals.iter().copied())),
        Some(Node::block(block)),
    )
}

fn iteration_body() -> Node {
    body(
        &["array", "x", "y"],
        0,
        vec![
            Node::lasgn("array", array(vec![lit(1), lit(2), lit(3)])),
            Node::iter(
                Node::call(Node::lvar("array"), "each", None),
                Some(Node::dasgn_curr("x", None)),
                Some(Node::block(vec![
                    Node::dasgn_curr("y", None),
                    Node::dasgn_curr("y", Some(Node::call(dvar("x"), "to_s", None))),
                    puts(dvar("y")),
                ])),
            ),
        ],
    )
}

fn bmethod_maker_block() -> Node {
    Node::iter(
        Node::fcall(
            "define_method",
            Some(array(vec![Node::sym("bmethod_added")])),
        ),
        Some(Node::dasgn_curr("x", None)),
        Some(call1(dvar("x"), "+", lit(1))),
    )
}

fn something() -> Runtime {
    let conditional = |then: Option<Node>, otherwise: Option<Node>| {
        body(
            &["arg1"],
            1,
            vec![Node::if_(call1(Node::lvar("arg1"), "==", lit(0)), then, otherwise)],
        )
    };
    let ret = |v: i64| Some(Node::return_(Some(lit(v))));
    let arith = || {
        Node::lasgn(
            "arg3",
            call1(call1(Node::lvar("arg1"), "*", Node::lvar("arg2")), "*", lit(7)),
        )
    };
    let report = || puts(Node::call(Node::lvar("arg3"), "to_s", None));
    let handler = |class: &str, var: &str, v: i64| {
        Node::resbody(
            Some(array(vec![konst(class)])),
            Some(Node::block(vec![Node::lasgn(var, gvar("$!")), lit(v)])),
        )
    };

    let ty = TypeDef::class("Something", 1, Some("Object"))
        .with_method("empty", body(&[], 0, vec![Node::nil()]))
        .with_method("stupid", body(&[], 0, vec![Node::return_(Some(Node::nil()))]))
        .with_method(
            "simple",
            body(
                &["arg1"],
                1,
                vec![
                    Node::fcall("print", Some(array(vec![Node::lvar("arg1")]))),
                    puts(Node::call(call1(lit(4), "+", lit(2)), "to_s", None)),
                ],
            ),
        )
        .with_method(
            "global",
            body(&[], 0, vec![call1(gvar("$stderr"), "fputs", Node::str_("blah"))]),
        )
        .with_method(
            "lasgn_call",
            body(&["c"], 0, vec![Node::lasgn("c", call1(lit(2), "+", lit(3)))]),
        )
        .with_method("conditional1", conditional(ret(1), None))
        .with_method("conditional2", conditional(None, ret(2)))
        .with_method("conditional3", conditional(ret(3), ret(4)))
        .with_method(
            "conditional4",
            conditional(
                ret(2),
                Some(Node::if_(
                    call1(Node::lvar("arg1"), "<", lit(0)),
                    ret(3),
                    ret(4),
                )),
            ),
        )
        .with_method("iteration1", iteration_body())
        .with_method(
            "iteration3",
            body(
                &["array1", "array2", "x", "y"],
                0,
                vec![
                    Node::lasgn("array1", array(vec![lit(1), lit(2), lit(3)])),
                    Node::lasgn("array2", array(vec![lit(4), lit(5), lit(6), lit(7)])),
                    Node::iter(
                        Node::call(Node::lvar("array1"), "each", None),
                        Some(Node::dasgn_curr("x", None)),
                        Some(Node::iter(
                            Node::call(Node::lvar("array2"), "each", None),
                            Some(Node::dasgn_curr("y", None)),
                            Some(Node::block(vec![
                                puts(Node::call(dvar("x"), "to_s", None)),
                                puts(Node::call(dvar("y"), "to_s", None)),
                            ])),
                        )),
                    ),
                ],
            ),
        )
        .with_method(
            "eric_is_stubborn",
            body(
                &["var", "var2"],
                0,
                vec![
                    Node::lasgn("var", lit(42)),
                    Node::lasgn("var2", Node::call(Node::lvar("var"), "to_s", None)),
                    call1(gvar("$stderr"), "fputs", Node::lvar("var2")),
                    Node::return_(Some(Node::lvar("var2"))),
                ],
            ),
        )
        .with_method(
            "determine_args",
            body(
                &[],
                0,
                vec![call1(
                    lit(5),
                    "==",
                    Node::fcall(
                        "unknown_args",
                        Some(array(vec![lit(4), Node::str_("known")])),
                    ),
                )],
            ),
        )
        .with_method(
            "unknown_args",
            body(
                &["arg1", "arg2"],
                2,
                vec![Node::return_(Some(Node::lvar("arg1")))],
            ),
        )
        .with_method(
            "iteration6",
            body(
                &[],
                0,
                vec![Node::iter(
                    call1(lit(3), "downto", lit(1)),
                    None,
                    Some(puts(Node::str_("hello"))),
                )],
            ),
        )
        .with_method(
            "opt_args",
            Node::scope(
                Some(LocalTable::with_locals(["arg1", "arg2", "args", "arg3"])),
                Some(Node::block(vec![
                    Node::args(
                        1,
                        Some(Node::block(vec![Node::lasgn("arg2", lit(42))])),
                        4,
                    ),
                    arith(),
                    report(),
                    Node::return_(Some(Node::str_("foo"))),
                ])),
            ),
        )
        .with_method(
            "multi_args",
            body(
                &["arg1", "arg2", "arg3"],
                2,
                vec![arith(), report(), Node::return_(Some(Node::str_("foo")))],
            ),
        )
        .with_method(
            "bools",
            body(
                &["arg1"],
                1,
                vec![Node::if_(
                    Node::call(Node::lvar("arg1"), "nil?", None),
                    Some(Node::return_(Some(Node::false_()))),
                    Some(Node::return_(Some(Node::true_()))),
                )],
            ),
        )
        .with_method(
            "case_stmt",
            body(
                &["var", "result"],
                0,
                vec![
                    Node::lasgn("var", lit(2)),
                    Node::lasgn("result", Node::str_("")),
                    Node::case(
                        Node::lvar("var"),
                        vec![
                            Node::when(
                                array(vec![lit(1)]),
                                Some(Node::block(vec![
                                    puts(Node::str_("something")),
                                    Node::lasgn("result", Node::str_("red")),
                                ])),
                            ),
                            Node::when(
                                array(vec![lit(2), lit(3)]),
                                Some(Node::lasgn("result", Node::str_("yellow"))),
                            ),
                            Node::when(array(vec![lit(4)]), None),
                            Node::lasgn("result", Node::str_("green")),
                        ],
                    ),
                    Node::case(
                        Node::lvar("result"),
                        ["red", "yellow", "green"]
                            .into_iter()
                            .zip(1..)
                            .map(|(color, v)| {
                                Node::when(
                                    array(vec![Node::str_(color)]),
                                    Some(Node::lasgn("var", lit(v))),
                                )
                            })
                            .collect(),
                    ),
                    Node::return_(Some(Node::lvar("result"))),
                ],
            ),
        )
        .with_method(
            "interpolated",
            body(
                &["var", "var2"],
                0,
                vec![
                    Node::lasgn("var", lit(14)),
                    Node::lasgn(
                        "var2",
                        Node::dstr(
                            "var is ",
                            vec![Node::evstr(Node::lvar("var")), Node::str_(". So there.")],
                        ),
                    ),
                ],
            ),
        )
        .with_method(
            "bbegin",
            body(
                &["e1", "e2"],
                0,
                vec![Node::begin(Some(Node::ensure(
                    Some(Node::rescue(
                        Some(lit(1)),
                        vec![handler("SyntaxError", "e1", 2), handler("Exception", "e2", 3)],
                        Some(lit(4)),
                    )),
                    Some(lit(5)),
                )))],
            ),
        )
        .with_method(
            "bbegin_no_exception",
            body(
                &[],
                0,
                vec![Node::begin(Some(Node::rescue(
                    Some(lit(5)),
                    vec![Node::resbody(None, Some(lit(6)))],
                    None,
                )))],
            ),
        )
        .with_method(
            "op_asgn",
            body(
                &["a", "b", "s", "c"],
                0,
                vec![
                    Node::lasgn("a", lit(0)),
                    Node::binary(NodeKind::OpAsgnOr, Node::lvar("a"), Node::lasgn("a", lit(1))),
                    Node::binary(NodeKind::OpAsgnAnd, Node::lvar("a"), Node::lasgn("a", lit(2))),
                    Node::lasgn("b", Node::leaf(NodeKind::Zarray)),
                    Node::op_asgn1(Node::lvar("b"), array(vec![lit(1)]), "||", lit(10)),
                    Node::op_asgn1(Node::lvar("b"), array(vec![lit(2)]), "&&", lit(11)),
                    Node::op_asgn1(Node::lvar("b"), array(vec![lit(3)]), "+", lit(12)),
                    Node::lasgn("s", call1(konst("Struct"), "new", Node::sym("var"))),
                    Node::lasgn("c", call1(Node::lvar("s"), "new", Node::nil())),
                    Node::op_asgn2(Node::lvar("c"), "var=", "||", lit(20)),
                    Node::op_asgn2(Node::lvar("c"), "var=", "&&", lit(21)),
                    Node::op_asgn2(Node::lvar("c"), "var=", "+", lit(22)),
                    Node::op_asgn2(
                        Node::call(Node::call(Node::lvar("c"), "d", None), "e", None),
                        "f=",
                        "||",
                        lit(42),
                    ),
                    Node::return_(Some(Node::lvar("a"))),
                ],
            ),
        )
        .with_method(
            "attrasgn",
            body(
                &[],
                0,
                vec![
                    Node::attrasgn(lit(42), "method=", Some(array(vec![Node::vcall("y")]))),
                    Node::attrasgn(
                        Node::self_(),
                        "type=",
                        Some(array(vec![Node::call(Node::vcall("other"), "type", None)])),
                    ),
                ],
            ),
        )
        .with_method(
            "whiles",
            body(
                &[],
                0,
                vec![
                    Node::while_loop(Node::false_(), Some(puts(Node::str_("false"))))
                        .pre_test(true),
                    Node::while_loop(Node::false_(), Some(puts(Node::str_("true"))))
                        .pre_test(false),
                ],
            ),
        )
        .with_method("xstr", body(&[], 0, vec![Node::xstr("touch 5")]))
        .with_method(
            "dxstr",
            body(
                &[],
                0,
                vec![Node::interpolated(NodeKind::Dxstr, "touch ", vec![lit(5)])],
            ),
        )
        .with_method("bmethod_added", Node::bmethod(ClosureRef(1)))
        .with_method("dmethod_added", Node::dmethod(ClosureRef(2)))
        .with_singleton_method(
            "classmethod",
            body(&[], 0, vec![call1(lit(1), "+", lit(1))]),
        )
        .with_singleton_method("bmethod_maker", body(&["x"], 0, vec![bmethod_maker_block()]));

    Runtime::new()
        .with_type(ty)
        .with_closure(
            ClosureRef(1),
            CapturedClosure::block(
                Some(Node::dasgn_curr("x", None)),
                call1(dvar("x"), "+", lit(1)),
            ),
        )
        .with_closure(
            ClosureRef(2),
            CapturedClosure::method("bmethod_maker", body(&["x"], 0, vec![bmethod_maker_block()])),
        )
}

fn tree_for(method: &str) -> SExpr {
    init_tracing();
    let runtime = something();
    let ty = runtime.type_named("Something").unwrap();
    ParseTree::new(Options::default())
        .tree_for_method(&runtime, ty, method)
        .unwrap()
}

#[test]
fn test_empty() {
    assert_eq!(tree_for("empty"), sx("(defn empty (scope (block (args) (nil))))"));
}

#[test]
fn test_stupid() {
    assert_eq!(
        tree_for("stupid"),
        sx("(defn stupid (scope (block (args) (return (nil)))))")
    );
}

#[test]
fn test_simple() {
    assert_eq!(
        tree_for("simple"),
        sx("(defn simple (scope (block (args arg1)
            (fcall print (array (lvar arg1)))
            (fcall puts (array (call (call (lit 4) + (array (lit 2))) to_s))))))")
    );
}

#[test]
fn test_global() {
    assert_eq!(
        tree_for("global"),
        sx(r#"(defn global (scope (block (args) (call (gvar $stderr) fputs (array (str "blah"))))))"#)
    );
}

#[test]
fn test_lasgn_call() {
    assert_eq!(
        tree_for("lasgn_call"),
        sx("(defn lasgn_call (scope (block (args) (lasgn c (call (lit 2) + (array (lit 3)))))))")
    );
}

#[test]
fn test_conditionals() {
    let cond = "(call (lvar arg1) == (array (lit 0)))";
    let expected = |branches: &str| {
        sx(&format!(
            "(scope (block (args arg1) (if {} {})))",
            cond, branches
        ))
    };
    assert_eq!(tree_for("conditional1").tail()[1], expected("(return (lit 1)) nil"));
    assert_eq!(tree_for("conditional2").tail()[1], expected("nil (return (lit 2))"));
    assert_eq!(
        tree_for("conditional3").tail()[1],
        expected("(return (lit 3)) (return (lit 4))")
    );
    assert_eq!(
        tree_for("conditional4").tail()[1],
        expected(
            "(return (lit 2))
             (if (call (lvar arg1) < (array (lit 0))) (return (lit 3)) (return (lit 4)))"
        )
    );
}

#[test]
fn test_iteration() {
    assert_eq!(
        tree_for("iteration1"),
        sx("(defn iteration1 (scope (block (args)
            (lasgn array (array (lit 1) (lit 2) (lit 3)))
            (iter (call (lvar array) each) (dasgn_curr x)
                (block
                    (dasgn_curr y)
                    (dasgn_curr y (call (dvar x) to_s))
                    (fcall puts (array (dvar y))))))))")
    );
    assert_eq!(
        tree_for("iteration6"),
        sx(r#"(defn iteration6 (scope (block (args)
            (iter (call (lit 3) downto (array (lit 1))) nil (fcall puts (array (str "hello")))))))"#)
    );
}

#[test]
fn test_nested_iteration() {
    assert_eq!(
        tree_for("iteration3"),
        sx("(defn iteration3 (scope (block (args)
            (lasgn array1 (array (lit 1) (lit 2) (lit 3)))
            (lasgn array2 (array (lit 4) (lit 5) (lit 6) (lit 7)))
            (iter (call (lvar array1) each) (dasgn_curr x)
                (iter (call (lvar array2) each) (dasgn_curr y)
                    (block
                        (fcall puts (array (call (dvar x) to_s)))
                        (fcall puts (array (call (dvar y) to_s)))))))))")
    );
}

#[test]
fn test_eric_is_stubborn() {
    assert_eq!(
        tree_for("eric_is_stubborn"),
        sx("(defn eric_is_stubborn (scope (block (args)
            (lasgn var (lit 42))
            (lasgn var2 (call (lvar var) to_s))
            (call (gvar $stderr) fputs (array (lvar var2)))
            (return (lvar var2)))))")
    );
}

#[test]
fn test_unknown_args() {
    assert_eq!(
        tree_for("unknown_args"),
        sx("(defn unknown_args (scope (block (args arg1 arg2) (return (lvar arg1)))))")
    );
    assert_eq!(
        tree_for("determine_args"),
        sx(r#"(defn determine_args (scope (block (args)
            (call (lit 5) == (array (fcall unknown_args (array (lit 4) (str "known"))))))))"#)
    );
}

#[test]
fn test_class_initialize() {
    init_tracing();
    let empty = || body(&[], 0, vec![Node::nil()]);
    let runtime = Runtime::new().with_type(
        TypeDef::class("SomethingWithInitialize", 2, Some("Object"))
            .with_method("protected_meth", empty())
            .with_method("initialize", empty()),
    );
    let types: Vec<&TypeDef> = runtime.types.iter().collect();
    let tree = ParseTree::new(Options::default()).tree_for_types(&runtime, &types);
    assert!(tree.errors.is_empty());
    assert_eq!(
        tree.forms,
        sx("((class SomethingWithInitialize Object
            (defn initialize (scope (block (args) (nil))))
            (defn protected_meth (scope (block (args) (nil))))))")
    );
}

#[test]
fn test_opt_args() {
    assert_eq!(
        tree_for("opt_args"),
        sx(r#"(defn opt_args (scope (block
            (args arg1 arg2 *args (block (lasgn arg2 (lit 42))))
            (lasgn arg3 (call (call (lvar arg1) * (array (lvar arg2))) * (array (lit 7))))
            (fcall puts (array (call (lvar arg3) to_s)))
            (return (str "foo")))))"#)
    );
}

#[test]
fn test_multi_args() {
    let tree = tree_for("multi_args");
    let block = &tree.tail()[1].tail()[0];
    assert_eq!(block.tail()[0], sx("(args arg1 arg2)"));
    assert_eq!(block.tail().len(), 4);
}

#[test]
fn test_bools() {
    assert_eq!(
        tree_for("bools"),
        sx("(defn bools (scope (block (args arg1)
            (if (call (lvar arg1) nil?) (return (false)) (return (true))))))")
    );
}

#[test]
fn test_case_stmt() {
    assert_eq!(
        tree_for("case_stmt"),
        sx(r#"(defn case_stmt (scope (block (args)
            (lasgn var (lit 2))
            (lasgn result (str ""))
            (case (lvar var)
                (when (array (lit 1))
                    (block (fcall puts (array (str "something"))) (lasgn result (str "red"))))
                (when (array (lit 2) (lit 3)) (lasgn result (str "yellow")))
                (when (array (lit 4)) nil)
                (lasgn result (str "green")))
            (case (lvar result)
                (when (array (str "red")) (lasgn var (lit 1)))
                (when (array (str "yellow")) (lasgn var (lit 2)))
                (when (array (str "green")) (lasgn var (lit 3)))
                nil)
            (return (lvar result)))))"#)
    );
}

#[test]
fn test_interpolated() {
    assert_eq!(
        tree_for("interpolated"),
        sx(r#"(defn interpolated (scope (block (args)
            (lasgn var (lit 14))
            (lasgn var2 (dstr "var is " (lvar var) (str ". So there."))))))"#)
    );
}

#[test]
fn test_bbegin() {
    assert_eq!(
        tree_for("bbegin"),
        sx("(defn bbegin (scope (block (args)
            (begin (ensure
                (rescue (lit 1)
                    (resbody (array (const SyntaxError)) (block (lasgn e1 (gvar $!)) (lit 2))
                        (resbody (array (const Exception)) (block (lasgn e2 (gvar $!)) (lit 3))))
                    (lit 4))
                (lit 5))))))")
    );
    assert_eq!(
        tree_for("bbegin_no_exception"),
        sx("(defn bbegin_no_exception (scope (block (args)
            (begin (rescue (lit 5) (resbody nil (lit 6)))))))")
    );
}

#[test]
fn test_op_asgn() {
    assert_eq!(
        tree_for("op_asgn"),
        sx(r"(defn op_asgn (scope (block (args)
            (lasgn a (lit 0))
            (op_asgn_or (lvar a) (lasgn a (lit 1)))
            (op_asgn_and (lvar a) (lasgn a (lit 2)))
            (lasgn b (zarray))
            (op_asgn1 (lvar b) (array (lit 1)) |\|\|| (lit 10))
            (op_asgn1 (lvar b) (array (lit 2)) && (lit 11))
            (op_asgn1 (lvar b) (array (lit 3)) + (lit 12))
            (lasgn s (call (const Struct) new (array (lit var))))
            (lasgn c (call (lvar s) new (array (nil))))
            (op_asgn2 (lvar c) var= |\|\|| (lit 20))
            (op_asgn2 (lvar c) var= && (lit 21))
            (op_asgn2 (lvar c) var= + (lit 22))
            (op_asgn2 (call (call (lvar c) d) e) f= |\|\|| (lit 42))
            (return (lvar a)))))")
    );
}

#[test]
fn test_attrasgn() {
    assert_eq!(
        tree_for("attrasgn"),
        sx("(defn attrasgn (scope (block (args)
            (attrasgn (lit 42) method= (array (vcall y)))
            (attrasgn (self) type= (array (call (vcall other) type))))))")
    );
}

#[test]
fn test_whiles() {
    assert_eq!(
        tree_for("whiles"),
        sx(r#"(defn whiles (scope (block (args)
            (while (false) (fcall puts (array (str "false"))) true)
            (while (false) (fcall puts (array (str "true"))) false))))"#)
    );
}

#[test]
fn test_xstr() {
    assert_eq!(
        tree_for("xstr"),
        sx(r#"(defn xstr (scope (block (args) (xstr "touch 5"))))"#)
    );
    assert_eq!(
        tree_for("dxstr"),
        sx(r#"(defn dxstr (scope (block (args) (dxstr "touch " (lit 5)))))"#)
    );
}

#[test]
fn test_bmethod_added() {
    assert_eq!(
        tree_for("bmethod_added"),
        sx("(defn bmethod_added (bmethod (dasgn_curr x) (call (dvar x) + (array (lit 1)))))")
    );
}

#[test]
fn test_dmethod_added() {
    assert_eq!(
        tree_for("dmethod_added"),
        sx("(defn dmethod_added (dmethod bmethod_maker (scope (block (args)
            (iter (fcall define_method (array (lit bmethod_added)))
                (dasgn_curr x)
                (call (dvar x) + (array (lit 1))))))))")
    );
}

#[test]
fn test_missing() {
    assert_eq!(tree_for("missing"), sx("(nil)"));
}

#[test]
fn test_singleton_methods() {
    init_tracing();
    let runtime = something();
    let ty = runtime.type_named("Something").unwrap();
    let mut tree = ParseTree::new(Options::default());

    assert_eq!(
        tree.tree_for_singleton_method(&runtime, ty, "classmethod").unwrap(),
        sx("(defn classmethod (scope (block (args) (call (lit 1) + (array (lit 1))))))")
    );
    assert_eq!(
        tree.tree_for_singleton_method(&runtime, ty, "bmethod_maker").unwrap(),
        sx("(defn bmethod_maker (scope (block (args)
            (iter (fcall define_method (array (lit bmethod_added)))
                (dasgn_curr x)
                (call (dvar x) + (array (lit 1)))))))")
    );
    // Instance and singleton tables are separate.
    assert_eq!(tree.tree_for_method(&runtime, ty, "classmethod").unwrap(), sx("(nil)"));
    assert_eq!(
        tree.tree_for_singleton_method(&runtime, ty, "empty").unwrap(),
        sx("(nil)")
    );
}

#[test]
fn test_class() {
    init_tracing();
    let runtime = something();
    let ty = runtime.type_named("Something").unwrap();
    let mut tree = ParseTree::new(Options::default());
    let class = tree.tree_for_type(&runtime, ty).unwrap();

    assert_eq!(class.head(), Some("class"));
    assert_eq!(class.tail()[0], SExpr::atom("Something"));
    assert_eq!(class.tail()[1], SExpr::atom("Object"));

    let names: Vec<&str> = class.tail()[2..]
        .iter()
        .map(|defn| defn.tail()[0].as_atom().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), ty.methods.len());

    for defn in &class.tail()[2..] {
        let name = defn.tail()[0].as_atom().unwrap();
        assert_eq!(*defn, tree.tree_for_method(&runtime, ty, name).unwrap());
    }
}
